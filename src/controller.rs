use crate::{
    clicker::{ClickEngine, EngineState},
    hotkeys::CONFIRM_KEY,
    platform::Pointer,
    settings::{Settings, SettingsStore},
    validate::{self, FormFields},
};
use rand::Rng;
use std::time::Duration;

pub const WINDOW_TITLE: &str = "MMO Auto Clicker";

/// Whether the next key press also rebinds a hotkey.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CaptureMode {
    #[default]
    Normal,
    AwaitingToggleKey,
    AwaitingMarkKey,
}

/// Owns everything the form, the timers and the hotkeys act on.
pub struct Controller<P> {
    settings: Settings,
    mode: CaptureMode,
    engine: ClickEngine,
    pointer: P,
    pub form: FormFields,
    error: String,
}

impl<P: Pointer> Controller<P> {
    pub fn new(pointer: P) -> Self {
        let settings = Settings::default();
        Self {
            form: FormFields::from_settings(&settings),
            settings,
            mode: CaptureMode::Normal,
            engine: ClickEngine::default(),
            pointer,
            error: String::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    /// Empty when the last update went through.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn title(&self) -> String {
        if self.state() == EngineState::Active {
            format!("{WINDOW_TITLE} *active*")
        } else {
            WINDOW_TITLE.to_string()
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self.state() {
            EngineState::Idle => "Start",
            EngineState::Active => "Stop",
        }
    }

    /// Rewrites every form field from the stored settings.
    pub fn refresh_form(&mut self) {
        self.form = FormFields::from_settings(&self.settings);
    }

    /// Keeps defaults when nothing usable is stored.
    pub fn load(&mut self, store: &SettingsStore) {
        match store.load() {
            Ok(Some(settings)) => {
                tracing::info!("loaded settings from {}", store.path().display());
                self.settings = settings;
            }
            Ok(None) => tracing::info!("no saved settings, using defaults"),
            Err(e) => tracing::warn!("settings file could not be read, using defaults: {e:#}"),
        }
        self.refresh_form();
    }

    pub fn save(&self, store: &SettingsStore) {
        match store.save(&self.settings) {
            Ok(()) => tracing::info!("saved settings to {}", store.path().display()),
            Err(e) => tracing::error!("saving settings failed: {e:#}"),
        }
    }

    /// Flips Idle/Active, then applies whatever is in the form.
    pub fn toggle(&mut self) {
        let state = self.engine.toggle();
        tracing::info!(?state, "toggled");
        self.commit_form();
    }

    pub fn mark(&mut self) {
        let (x, y) = self.pointer.cursor_position();
        self.settings.mark_x = x;
        self.settings.mark_y = y;
        tracing::info!(x, y, "marked");
        self.refresh_form();
    }

    /// All-or-nothing; on failure only the error line changes.
    pub fn commit_form(&mut self) -> bool {
        match validate::parse_form(&self.form, &self.settings) {
            Ok(settings) => {
                self.settings = settings;
                self.error.clear();
                self.refresh_form();
                true
            }
            Err(e) => {
                tracing::debug!("form rejected: {e}");
                self.error = e.to_string();
                false
            }
        }
    }

    pub fn arm_toggle_rebind(&mut self) {
        self.mode = CaptureMode::AwaitingToggleKey;
    }

    pub fn arm_mark_rebind(&mut self) {
        self.mode = CaptureMode::AwaitingMarkKey;
    }

    /// Routes one globally pressed key. Bindings are matched as they were
    /// before the key arrived; an armed rebind then takes the key as well.
    pub fn handle_key(&mut self, key: &str) {
        if key == self.settings.toggle_key {
            self.toggle();
        } else if key == self.settings.mark_key {
            self.mark();
        } else if key == CONFIRM_KEY {
            self.commit_form();
        }

        match self.mode {
            CaptureMode::AwaitingToggleKey => {
                self.settings.toggle_key = key.to_string();
                self.finish_rebind("toggle", key);
            }
            CaptureMode::AwaitingMarkKey => {
                self.settings.mark_key = key.to_string();
                self.finish_rebind("mark", key);
            }
            CaptureMode::Normal => {}
        }
    }

    fn finish_rebind(&mut self, which: &str, key: &str) {
        tracing::info!("{which} key bound to {key:?}");
        self.mode = CaptureMode::Normal;
        self.refresh_form();
    }

    /// One click-timer tick; returns the delay until the next one.
    pub fn tick<R: Rng>(&self, rng: &mut R) -> Duration {
        self.engine.tick(&self.settings, &self.pointer, rng)
    }
}
