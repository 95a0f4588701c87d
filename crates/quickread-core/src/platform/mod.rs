//! Host platform adapter.
//!
//! A host exposes its pages ("tabs") and a small key-value store through
//! [`Platform`]. [`PlatformBridge`] turns any platform into the reader's
//! [`TextProvider`] and [`SettingsStore`].

use alloc::string::String;

use log::debug;

use crate::{
    content::{
        TextProvider,
        page::{TabMessage, TabReply},
    },
    settings::{CHUNKING_KEY, PersistedSettings, SettingsStore, StoredSettings, WPM_KEY},
};

mod fallback;
mod memory;

pub use fallback::{FallbackError, FallbackPlatform};
pub use memory::{MemoryPlatform, MemoryPlatformError};

/// Keys the reader persists.
pub const SETTINGS_KEYS: [&str; 2] = [WPM_KEY, CHUNKING_KEY];

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TabId(pub u32);

/// Failure reported by a [`Platform`].
pub trait PlatformError: core::fmt::Debug {
    /// The backend does not offer the service at all, as opposed to failing
    /// while providing it.
    fn is_unavailable(&self) -> bool;
}

#[allow(async_fn_in_trait)]
pub trait Platform {
    type Error: PlatformError;

    /// The tab the user is looking at, if any.
    fn query_active_tab(&mut self) -> Result<Option<TabId>, Self::Error>;

    async fn send_message_to_tab(
        &mut self,
        tab: TabId,
        message: TabMessage,
    ) -> Result<TabReply, Self::Error>;

    /// Reads `keys` from storage. Unknown or missing keys stay `None`.
    fn storage_get(&mut self, keys: &[&str]) -> Result<StoredSettings, Self::Error>;

    fn storage_set(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}

/// Reader-facing view of a [`Platform`].
#[derive(Debug)]
pub struct PlatformBridge<P> {
    platform: P,
}

impl<P: Platform> PlatformBridge<P> {
    pub const fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}

impl<P: Platform> TextProvider for PlatformBridge<P> {
    type Error = P::Error;

    async fn selected_text(&mut self) -> Result<String, Self::Error> {
        let Some(tab) = self.platform.query_active_tab()? else {
            debug!("platform: no active tab");
            return Ok(String::new());
        };

        let reply = self
            .platform
            .send_message_to_tab(tab, TabMessage::GetSelection)
            .await?;
        Ok(reply.text)
    }
}

impl<P: Platform> SettingsStore for PlatformBridge<P> {
    type Error = P::Error;

    fn load(&mut self) -> Result<StoredSettings, Self::Error> {
        self.platform.storage_get(&SETTINGS_KEYS)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.platform.storage_set(settings)
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::content::page::{ContentHint, PageSnapshot};

    #[test]
    fn bridge_reads_active_tab_text() {
        let page = PageSnapshot::from_body("body").with_selection("  chosen words ");
        let mut bridge = PlatformBridge::new(MemoryPlatform::with_pages([page]));

        assert_eq!(block_on(bridge.selected_text()).unwrap(), "chosen words");
    }

    #[test]
    fn bridge_without_active_tab_reads_nothing() {
        let mut bridge = PlatformBridge::new(MemoryPlatform::new());
        assert_eq!(block_on(bridge.selected_text()).unwrap(), "");
    }

    #[test]
    fn bridge_falls_back_to_main_region() {
        let article = "word ".repeat(30);
        let page = PageSnapshot::from_body("nav footer").with_region(ContentHint::Article, article);
        let mut bridge = PlatformBridge::new(MemoryPlatform::with_pages([page]));

        let text = block_on(bridge.selected_text()).unwrap();
        assert_eq!(text.split_whitespace().count(), 30);
    }

    #[test]
    fn bridge_persists_settings() {
        let mut bridge = PlatformBridge::new(MemoryPlatform::new());
        assert_eq!(bridge.load().unwrap(), StoredSettings::default());

        bridge.save(&PersistedSettings::new(450, false)).unwrap();
        let stored = bridge.load().unwrap();
        assert_eq!(stored.usable_wpm(), Some(450));
        assert_eq!(stored.chunking_enabled, Some(false));
    }
}
