//! Persisted user settings abstraction.

/// Storage key for the reading rate.
pub const WPM_KEY: &str = "wpm";
/// Storage key for the chunking toggle.
pub const CHUNKING_KEY: &str = "chunking";

/// User-tunable settings that should survive restarts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub chunking_enabled: bool,
}

impl PersistedSettings {
    pub const fn new(wpm: u16, chunking_enabled: bool) -> Self {
        Self {
            wpm,
            chunking_enabled,
        }
    }
}

/// Whatever a store had on record; either key may be missing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct StoredSettings {
    pub wpm: Option<u16>,
    pub chunking_enabled: Option<bool>,
}

impl StoredSettings {
    /// A stored rate of zero counts as missing.
    pub fn usable_wpm(&self) -> Option<u16> {
        self.wpm.filter(|wpm| *wpm > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.usable_wpm().is_none() && self.chunking_enabled.is_none()
    }
}

impl From<PersistedSettings> for StoredSettings {
    fn from(settings: PersistedSettings) -> Self {
        Self {
            wpm: Some(settings.wpm),
            chunking_enabled: Some(settings.chunking_enabled),
        }
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error: core::fmt::Debug;

    fn load(&mut self) -> Result<StoredSettings, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_wpm_is_treated_as_missing() {
        let stored = StoredSettings {
            wpm: Some(0),
            chunking_enabled: None,
        };
        assert_eq!(stored.usable_wpm(), None);
        assert!(stored.is_empty());
    }

    #[test]
    fn persisted_settings_fill_every_key() {
        let stored = StoredSettings::from(PersistedSettings::new(420, false));
        assert_eq!(stored.usable_wpm(), Some(420));
        assert_eq!(stored.chunking_enabled, Some(false));
    }
}
