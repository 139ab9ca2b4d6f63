use crate::settings::Settings;
use std::fmt;

/// Raw text of every editable field, exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    pub min_delay: String,
    pub max_delay: String,
    pub jitter_width: String,
    pub jitter_height: String,
    pub mark_x: String,
    pub mark_y: String,
}

impl FormFields {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            min_delay: settings.min_delay_ms.to_string(),
            max_delay: settings.max_delay_ms.to_string(),
            jitter_width: settings.jitter_width.to_string(),
            jitter_height: settings.jitter_height.to_string(),
            mark_x: settings.mark_x.to_string(),
            mark_y: settings.mark_y.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormError {
    /// A delay is not a number, or min is not below max.
    DelayRange,
    /// Jitter or mark coordinates failed to parse.
    Fields,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::DelayRange => f.write_str("The min/max is incorrect!"),
            FormError::Fields => f.write_str("One or more of your inputs was incorrect!"),
        }
    }
}

impl std::error::Error for FormError {}

fn parse_i64(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}

/// Delays are at least 1ms.
pub fn parse_delay(text: &str) -> Option<u64> {
    parse_i64(text).map(|n| n.max(1) as u64)
}

pub fn parse_non_negative(text: &str) -> Option<u32> {
    parse_i64(text).map(|n| n.clamp(0, u32::MAX as i64) as u32)
}

/// Unclamped; marks left of or above the primary monitor are negative.
pub fn parse_int(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// Builds the settings a form submission would produce, keeping the hotkey
/// bindings of `current`. Nothing is applied on error.
pub fn parse_form(form: &FormFields, current: &Settings) -> Result<Settings, FormError> {
    let (min_delay_ms, max_delay_ms) =
        match (parse_delay(&form.min_delay), parse_delay(&form.max_delay)) {
            (Some(min), Some(max)) if min < max => (min, max),
            _ => return Err(FormError::DelayRange),
        };

    let (Some(jitter_width), Some(jitter_height), Some(mark_x), Some(mark_y)) = (
        parse_non_negative(&form.jitter_width),
        parse_non_negative(&form.jitter_height),
        parse_int(&form.mark_x),
        parse_int(&form.mark_y),
    ) else {
        return Err(FormError::Fields);
    };

    Ok(Settings {
        min_delay_ms,
        max_delay_ms,
        jitter_width,
        jitter_height,
        mark_x,
        mark_y,
        toggle_key: current.toggle_key.clone(),
        mark_key: current.mark_key.clone(),
    })
}
