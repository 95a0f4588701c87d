//! File-backed [`Platform`](quickread_core::platform::Platform).

use log::info;
use quickread_core::{
    content::sample::moby_dick_page,
    platform::{FallbackPlatform, MemoryPlatform},
};

use crate::storage::settings_file::SettingsFile;

mod file;

pub use file::{DocumentSource, FilePlatform};

/// Files first; in-memory pages and storage cover only what no file provides.
pub type DesktopPlatform = FallbackPlatform<FilePlatform, MemoryPlatform>;

/// Wires the desktop reader. Without a document the sample page is read, and
/// without a settings path settings live for the session only. Failures of a
/// named document or settings file are reported, never papered over.
pub fn desktop_platform(
    document: Option<DocumentSource>,
    selection: Option<String>,
    settings: Option<SettingsFile>,
) -> DesktopPlatform {
    let fallback = if document.is_none() {
        info!("platform: no document given, reading the sample page");
        MemoryPlatform::with_pages([moby_dick_page()])
    } else {
        MemoryPlatform::new()
    };

    match settings.as_ref() {
        Some(file) => info!("settings: using {}", file.path().display()),
        None => info!("settings: no settings path, keeping changes in memory"),
    }

    let primary = FilePlatform::new(document, settings).with_selection(selection);
    FallbackPlatform::new(primary, fallback)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use embassy_futures::block_on;
    use quickread_core::{
        content::TextProvider,
        platform::{FallbackError, PlatformBridge},
        settings::{PersistedSettings, SettingsStore},
    };

    use super::*;
    use crate::HostError;

    #[test]
    fn without_document_or_settings_memory_takes_over() {
        let mut bridge = PlatformBridge::new(desktop_platform(None, None, None));

        let text = block_on(bridge.selected_text()).unwrap();
        assert!(text.starts_with("Call me Ishmael."));

        bridge.save(&PersistedSettings::new(320, true)).unwrap();
        assert_eq!(bridge.load().unwrap().usable_wpm(), Some(320));
    }

    #[test]
    fn named_document_that_cannot_be_read_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let document = DocumentSource::File(dir.path().join("missing.txt"));
        let mut bridge = PlatformBridge::new(desktop_platform(Some(document), None, None));

        assert!(matches!(
            block_on(bridge.selected_text()),
            Err(FallbackError::Primary(HostError::Read { .. }))
        ));
    }

    #[test]
    fn settings_file_that_cannot_be_written_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let settings = SettingsFile::new(blocker.join("settings.toml"));
        let mut bridge = PlatformBridge::new(desktop_platform(None, None, Some(settings)));

        assert!(matches!(
            bridge.save(&PersistedSettings::new(300, true)),
            Err(FallbackError::Primary(HostError::Write { .. }))
        ));
        // Nothing was written to the in-memory stand-in either.
        assert_eq!(bridge.platform_mut().secondary_mut().storage().wpm, None);
    }

    #[test]
    fn settings_file_round_trips_through_the_desktop_platform() {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsFile::new(dir.path().join("settings.toml"));
        let mut bridge = PlatformBridge::new(desktop_platform(None, None, Some(settings)));

        bridge.save(&PersistedSettings::new(410, false)).unwrap();
        assert!(dir.path().join("settings.toml").exists());
        assert_eq!(bridge.load().unwrap().usable_wpm(), Some(410));
    }
}
