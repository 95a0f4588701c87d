use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use log::{debug, info};
use quickread_core::{
    content::page::{PageSnapshot, TabMessage, TabReply, handle_tab_message},
    platform::{Platform, TabId},
    settings::{PersistedSettings, StoredSettings},
};

use crate::{HostError, storage::settings_file::SettingsFile};

const DOCUMENT_TAB: TabId = TabId(0);

/// Where the document text comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DocumentSource {
    File(PathBuf),
    /// Standard input, read once on first use.
    Stdin,
}

impl DocumentSource {
    /// `-` means standard input.
    pub fn from_arg(arg: PathBuf) -> Self {
        if arg.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(arg)
        }
    }
}

/// Desktop platform: one open document and an optional settings file.
///
/// Without a document, [`Platform::query_active_tab`] fails with
/// [`HostError::NoDocument`]; without a settings file, storage calls fail with
/// [`HostError::NoSettingsFile`]. Both let a fallback platform take over.
#[derive(Debug)]
pub struct FilePlatform {
    document: Option<DocumentSource>,
    selection: Option<String>,
    settings: Option<SettingsFile>,
    stdin_text: Option<String>,
}

impl FilePlatform {
    pub fn new(document: Option<DocumentSource>, settings: Option<SettingsFile>) -> Self {
        Self {
            document,
            selection: None,
            settings,
            stdin_text: None,
        }
    }

    /// Pretends the user selected `selection` inside the document.
    pub fn with_selection(mut self, selection: Option<String>) -> Self {
        self.selection = selection;
        self
    }

    fn document_text(&mut self) -> Result<String, HostError> {
        match self.document.as_ref().ok_or(HostError::NoDocument)? {
            DocumentSource::File(path) => {
                let text = fs::read_to_string(path).map_err(|source| HostError::Read {
                    path: path.clone(),
                    source,
                })?;
                debug!("platform: read {} bytes from {}", text.len(), path.display());
                Ok(text)
            }
            DocumentSource::Stdin => {
                if let Some(text) = self.stdin_text.as_ref() {
                    return Ok(text.clone());
                }

                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| HostError::Read {
                        path: PathBuf::from("-"),
                        source,
                    })?;
                info!("platform: read {} bytes from stdin", text.len());
                self.stdin_text = Some(text.clone());
                Ok(text)
            }
        }
    }

    fn page(&mut self) -> Result<PageSnapshot, HostError> {
        let body = self.document_text()?;
        let page = PageSnapshot::from_body(body);
        Ok(match self.selection.as_ref() {
            Some(selection) => page.with_selection(selection.as_str()),
            None => page,
        })
    }

    fn settings(&self) -> Result<&SettingsFile, HostError> {
        self.settings.as_ref().ok_or(HostError::NoSettingsFile)
    }
}

impl Platform for FilePlatform {
    type Error = HostError;

    fn query_active_tab(&mut self) -> Result<Option<TabId>, Self::Error> {
        if self.document.is_none() {
            return Err(HostError::NoDocument);
        }
        Ok(Some(DOCUMENT_TAB))
    }

    async fn send_message_to_tab(
        &mut self,
        tab: TabId,
        message: TabMessage,
    ) -> Result<TabReply, Self::Error> {
        if tab != DOCUMENT_TAB {
            return Err(HostError::NoSuchTab(tab));
        }

        let page = self.page()?;
        Ok(handle_tab_message(&page, message))
    }

    fn storage_get(&mut self, keys: &[&str]) -> Result<StoredSettings, Self::Error> {
        self.settings()?.read(keys)
    }

    fn storage_set(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        self.settings()?.write(settings)
    }
}
