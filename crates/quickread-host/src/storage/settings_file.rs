//! Settings kept in a small TOML file.
//!
//! ```toml
//! wpm = 350
//! chunking = true
//! ```
//!
//! Unknown keys are ignored. A file that does not parse is reported and read
//! as empty, so the reader starts from its defaults.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::warn;
use quickread_core::settings::{
    CHUNKING_KEY, PersistedSettings, SettingsStore, StoredSettings, WPM_KEY,
};
use serde::{Deserialize, Serialize};

use crate::HostError;

/// On-disk shape of the settings file.
#[derive(Debug, Default, Deserialize, Serialize)]
struct SettingsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wpm: Option<u16>,
    #[serde(default, rename = "chunking", skip_serializing_if = "Option::is_none")]
    chunking_enabled: Option<bool>,
}

impl From<&PersistedSettings> for SettingsRecord {
    fn from(settings: &PersistedSettings) -> Self {
        Self {
            wpm: Some(settings.wpm),
            chunking_enabled: Some(settings.chunking_enabled),
        }
    }
}

impl From<SettingsRecord> for StoredSettings {
    fn from(record: SettingsRecord) -> Self {
        Self {
            wpm: record.wpm,
            chunking_enabled: record.chunking_enabled,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads `keys` from the file. A missing file reads as empty.
    pub fn read(&self, keys: &[&str]) -> Result<StoredSettings, HostError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(StoredSettings::default()),
            Err(source) => {
                return Err(HostError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let mut stored = match decode_settings(&text) {
            Ok(stored) => stored,
            Err(err) => {
                warn!(
                    "settings: failed to parse {}, using defaults: {}",
                    self.path.display(),
                    err
                );
                StoredSettings::default()
            }
        };
        if !keys.contains(&WPM_KEY) {
            stored.wpm = None;
        }
        if !keys.contains(&CHUNKING_KEY) {
            stored.chunking_enabled = None;
        }
        Ok(stored)
    }

    /// Replaces the file contents, creating parent directories as needed.
    pub fn write(&self, settings: &PersistedSettings) -> Result<(), HostError> {
        let write_err = |source| HostError::Write {
            path: self.path.clone(),
            source,
        };

        let text = encode_settings(settings)?;

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let staging = self.path.with_extension("tmp");
        fs::write(&staging, text).map_err(write_err)?;
        fs::rename(&staging, &self.path).map_err(write_err)
    }
}

impl SettingsStore for SettingsFile {
    type Error = HostError;

    fn load(&mut self) -> Result<StoredSettings, Self::Error> {
        self.read(&[WPM_KEY, CHUNKING_KEY])
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.write(settings)
    }
}

pub fn encode_settings(settings: &PersistedSettings) -> Result<String, HostError> {
    Ok(toml::to_string(&SettingsRecord::from(settings))?)
}

pub fn decode_settings(text: &str) -> Result<StoredSettings, toml::de::Error> {
    toml::from_str::<SettingsRecord>(text).map(StoredSettings::from)
}
