//! Player preferences
//!
//! Persisted in LocalStorage so the chosen mode and custom wheel survive a
//! reload.

use serde::{Deserialize, Serialize};

use crate::consts::WHEEL_SLOTS;
use crate::error::SpinError;
use crate::modes::GameMode;

/// Player settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Vibrate on release and settle
    pub haptics: bool,
    /// Skip the needle wobble
    pub reduced_motion: bool,
    /// Mode restored on next visit
    pub last_mode: GameMode,
    /// Custom wheel text boxes, blanks included
    pub custom_entries: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            reduced_motion: false,
            last_mode: GameMode::Fun,
            custom_entries: vec![String::new(); WHEEL_SLOTS],
        }
    }
}

impl Settings {
    /// Effective needle tilt (respects reduced_motion)
    pub fn effective_needle_tilt(&self, tilt: f64) -> f64 {
        if self.reduced_motion { 0.0 } else { tilt }
    }

    /// Set one custom text box; out-of-range slots are ignored
    pub fn set_custom_entry(&mut self, slot: usize, text: &str) {
        if self.custom_entries.len() < WHEEL_SLOTS {
            self.custom_entries.resize(WHEEL_SLOTS, String::new());
        }
        if let Some(entry) = self.custom_entries.get_mut(slot) {
            *entry = text.to_string();
        }
    }

    pub fn to_json(&self) -> Result<String, SpinError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SpinError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "spin_party_settings";

    #[cfg(target_arch = "wasm32")]
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Stored settings, or defaults when missing or unreadable
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.as_deref().map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Restored {} mode settings", settings.last_mode.as_str());
                settings
            }
            Some(Err(e)) => {
                log::warn!("Discarding stored settings: {e}");
                Self::default()
            }
            None => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let Some(storage) = Self::storage() else { return };
        match self.to_json() {
            Ok(json) => {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Settings not saved: storage quota or access denied");
                }
            }
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }

    /// Nothing persists outside the browser
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.haptics);
        assert_eq!(settings.last_mode, GameMode::Fun);
        assert_eq!(settings.custom_entries.len(), WHEEL_SLOTS);
    }

    #[test]
    fn test_json_roundtrip_and_missing_fields() {
        let mut settings = Settings::default();
        settings.last_mode = GameMode::Custom;
        settings.set_custom_entry(1, "shots");
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);

        let partial = Settings::from_json(r#"{ "haptics": false }"#).unwrap();
        assert!(!partial.haptics);
        assert_eq!(partial.custom_entries.len(), WHEEL_SLOTS);

        assert!(Settings::from_json("{").is_err());
    }

    #[test]
    fn test_custom_entry_slots() {
        let mut settings = Settings {
            custom_entries: Vec::new(),
            ..Default::default()
        };
        settings.set_custom_entry(3, "water");
        settings.set_custom_entry(8, "ignored");
        assert_eq!(settings.custom_entries.len(), WHEEL_SLOTS);
        assert_eq!(settings.custom_entries[3], "water");
    }

    #[test]
    fn test_native_load_is_default() {
        Settings::default().save();
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_reduced_motion_hides_tilt() {
        let mut settings = Settings::default();
        assert_eq!(settings.effective_needle_tilt(7.5), 7.5);
        settings.reduced_motion = true;
        assert_eq!(settings.effective_needle_tilt(7.5), 0.0);
    }
}
