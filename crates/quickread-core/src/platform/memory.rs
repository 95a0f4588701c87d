use alloc::vec::Vec;

use super::{Platform, PlatformError, TabId};
use crate::{
    content::page::{PageSnapshot, TabMessage, TabReply, handle_tab_message},
    settings::{CHUNKING_KEY, PersistedSettings, StoredSettings, WPM_KEY},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MemoryPlatformError {
    Unavailable,
    NoSuchTab(TabId),
}

impl PlatformError for MemoryPlatformError {
    fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// In-memory platform: a list of pages and a settings record.
#[derive(Clone, Debug)]
pub struct MemoryPlatform {
    pages: Vec<PageSnapshot>,
    active: Option<usize>,
    storage: StoredSettings,
    available: bool,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            active: None,
            storage: StoredSettings::default(),
            available: true,
        }
    }

    /// Platform with `pages` open and the first one active.
    pub fn with_pages(pages: impl IntoIterator<Item = PageSnapshot>) -> Self {
        let pages: Vec<PageSnapshot> = pages.into_iter().collect();
        let active = (!pages.is_empty()).then_some(0);
        Self {
            pages,
            active,
            ..Self::new()
        }
    }

    pub fn with_storage(mut self, storage: StoredSettings) -> Self {
        self.storage = storage;
        self
    }

    pub fn open_page(&mut self, page: PageSnapshot) -> TabId {
        self.pages.push(page);
        let index = self.pages.len() - 1;
        self.active = Some(index);
        TabId(index as u32)
    }

    /// While unavailable every call fails with [`MemoryPlatformError::Unavailable`].
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn storage(&self) -> StoredSettings {
        self.storage
    }

    fn ensure_available(&self) -> Result<(), MemoryPlatformError> {
        if self.available {
            Ok(())
        } else {
            Err(MemoryPlatformError::Unavailable)
        }
    }
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for MemoryPlatform {
    type Error = MemoryPlatformError;

    fn query_active_tab(&mut self) -> Result<Option<TabId>, Self::Error> {
        self.ensure_available()?;
        Ok(self.active.map(|index| TabId(index as u32)))
    }

    async fn send_message_to_tab(
        &mut self,
        tab: TabId,
        message: TabMessage,
    ) -> Result<TabReply, Self::Error> {
        self.ensure_available()?;
        let page = self
            .pages
            .get(tab.0 as usize)
            .ok_or(MemoryPlatformError::NoSuchTab(tab))?;
        Ok(handle_tab_message(page, message))
    }

    fn storage_get(&mut self, keys: &[&str]) -> Result<StoredSettings, Self::Error> {
        self.ensure_available()?;
        let mut stored = StoredSettings::default();
        for key in keys {
            match *key {
                WPM_KEY => stored.wpm = self.storage.wpm,
                CHUNKING_KEY => stored.chunking_enabled = self.storage.chunking_enabled,
                _ => {}
            }
        }
        Ok(stored)
    }

    fn storage_set(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.ensure_available()?;
        self.storage = StoredSettings::from(*settings);
        Ok(())
    }
}
