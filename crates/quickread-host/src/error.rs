use std::{io, path::PathBuf};

use quickread_core::platform::{PlatformError, TabId};

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("terminal i/o failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("no document open")]
    NoDocument,
    #[error("no settings file configured")]
    NoSettingsFile,
    #[error("no such tab: {0:?}")]
    NoSuchTab(TabId),
}

impl PlatformError for HostError {
    fn is_unavailable(&self) -> bool {
        matches!(self, Self::NoDocument | Self::NoSettingsFile)
    }
}
