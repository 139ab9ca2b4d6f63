use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

pub const SETTINGS_DIR_NAME: &str = "AutoClickerSettings";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// The flat record behind every field of the form.
///
/// Field names on disk match the upper-case keys older settings files use.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "MIN_DELAY")]
    pub min_delay_ms: u64,
    #[serde(rename = "MAX_DELAY")]
    pub max_delay_ms: u64,
    /// How many pixels +- to stray horizontally from the mark.
    #[serde(rename = "CURSOR_RANDOM_X_POSITION_WIDTH")]
    pub jitter_width: u32,
    #[serde(rename = "CURSOR_RANDOM_Y_POSITION_HEIGHT")]
    pub jitter_height: u32,
    #[serde(rename = "COORDS_X")]
    pub mark_x: i32,
    #[serde(rename = "COORDS_Y")]
    pub mark_y: i32,
    #[serde(rename = "KEY_TOGGLE")]
    pub toggle_key: String,
    #[serde(rename = "KEY_MARK")]
    pub mark_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_delay_ms: 1400,
            max_delay_ms: 1600,
            jitter_width: 3,
            jitter_height: 1,
            mark_x: 0,
            mark_y: 0,
            toggle_key: "page up".to_string(),
            mark_key: "end".to_string(),
        }
    }
}

impl Settings {
    pub fn has_valid_delays(&self) -> bool {
        self.min_delay_ms >= 1 && self.min_delay_ms < self.max_delay_ms
    }
}

/// Reads and writes [`Settings`] as JSON inside one directory.
#[derive(Clone, Debug)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<config dir>/AutoClickerSettings`, i.e. `%APPDATA%` on Windows.
    pub fn per_user() -> Result<Self> {
        let base = dirs::config_dir().context("no per-user configuration directory")?;
        Ok(Self::new(base.join(SETTINGS_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    /// Returns `Ok(None)` when nothing has been saved yet.
    pub fn load(&self) -> Result<Option<Settings>> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("creating {}", self.dir.display()))?;
        }

        let path = self.path();
        if !path.is_file() {
            return Ok(None);
        }

        let text = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        if !settings.has_valid_delays() {
            bail!(
                "{} has an unusable delay range {}..{}",
                path.display(),
                settings.min_delay_ms,
                settings.max_delay_ms
            );
        }
        Ok(Some(settings))
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating {}", self.dir.display()))?;
        let path = self.path();
        let text = serde_json::to_string_pretty(settings)?;
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))
    }
}
