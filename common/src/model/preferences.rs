use log::warn;
use serde::{Deserialize, Serialize};

/// Key under which the front-end stores [`Preferences`] in `localStorage`.
pub const PREFERENCES_STORAGE_KEY: &str = "inkpost.preferences";

/// User preferences shared by the whole application.
///
/// Loaded once at startup and saved on every change. Components receive the
/// current value through context instead of reading storage themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
}

impl Preferences {
    /// Parses stored preferences. Malformed input yields the defaults.
    pub fn from_json(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|e| {
            warn!("discarding malformed preferences: {e}");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn toggled_dark_mode(&self) -> Self {
        Self {
            dark_mode: !self.dark_mode,
        }
    }

    /// CSS theme class for the root element.
    pub fn theme_class(&self) -> &'static str {
        if self.dark_mode { "theme-dark" } else { "theme-light" }
    }
}
