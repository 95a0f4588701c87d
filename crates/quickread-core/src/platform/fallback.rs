use log::{debug, warn};

use super::{Platform, PlatformError, TabId};
use crate::{
    content::page::{TabMessage, TabReply},
    settings::{PersistedSettings, StoredSettings},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FallbackError<A, B> {
    /// The primary failed while serving the call. The secondary was not asked.
    Primary(A),
    /// The primary does not offer the service and the secondary failed too.
    Both { primary: A, secondary: B },
}

impl<A: PlatformError, B: PlatformError> PlatformError for FallbackError<A, B> {
    fn is_unavailable(&self) -> bool {
        match self {
            Self::Primary(primary) => primary.is_unavailable(),
            Self::Both { secondary, .. } => secondary.is_unavailable(),
        }
    }
}

/// Serves from `primary` and repeats a call on `secondary` only when the
/// primary reports the service as unavailable. Any other primary failure is
/// returned as is.
#[derive(Clone, Debug)]
pub struct FallbackPlatform<A, B> {
    primary: A,
    secondary: B,
}

impl<A, B> FallbackPlatform<A, B> {
    pub const fn new(primary: A, secondary: B) -> Self {
        Self { primary, secondary }
    }

    pub fn secondary_mut(&mut self) -> &mut B {
        &mut self.secondary
    }
}

/// Decides whether a failed primary call may move on to the secondary.
fn unavailable<A: PlatformError, B>(primary: A, call: &str) -> Result<A, FallbackError<A, B>> {
    if primary.is_unavailable() {
        debug!("platform: primary has no {}, using secondary", call);
        Ok(primary)
    } else {
        warn!("platform: primary {} failed: {:?}", call, primary);
        Err(FallbackError::Primary(primary))
    }
}

impl<A: Platform, B: Platform> Platform for FallbackPlatform<A, B> {
    type Error = FallbackError<A::Error, B::Error>;

    fn query_active_tab(&mut self) -> Result<Option<TabId>, Self::Error> {
        match self.primary.query_active_tab() {
            Ok(tab) => Ok(tab),
            Err(primary) => {
                let primary = unavailable::<_, B::Error>(primary, "tab query")?;
                self.secondary
                    .query_active_tab()
                    .map_err(|secondary| FallbackError::Both { primary, secondary })
            }
        }
    }

    async fn send_message_to_tab(
        &mut self,
        tab: TabId,
        message: TabMessage,
    ) -> Result<TabReply, Self::Error> {
        match self.primary.send_message_to_tab(tab, message).await {
            Ok(reply) => Ok(reply),
            Err(primary) => {
                let primary = unavailable::<_, B::Error>(primary, "tab message")?;
                // Tab ids are backend-local, so ask the secondary for its own.
                let secondary_tab = match self.secondary.query_active_tab() {
                    Ok(Some(secondary_tab)) => secondary_tab,
                    Ok(None) => return Ok(TabReply::default()),
                    Err(secondary) => return Err(FallbackError::Both { primary, secondary }),
                };
                self.secondary
                    .send_message_to_tab(secondary_tab, message)
                    .await
                    .map_err(|secondary| FallbackError::Both { primary, secondary })
            }
        }
    }

    fn storage_get(&mut self, keys: &[&str]) -> Result<StoredSettings, Self::Error> {
        match self.primary.storage_get(keys) {
            Ok(stored) => Ok(stored),
            Err(primary) => {
                let primary = unavailable::<_, B::Error>(primary, "storage read")?;
                self.secondary
                    .storage_get(keys)
                    .map_err(|secondary| FallbackError::Both { primary, secondary })
            }
        }
    }

    fn storage_set(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        match self.primary.storage_set(settings) {
            Ok(()) => Ok(()),
            Err(primary) => {
                let primary = unavailable::<_, B::Error>(primary, "storage write")?;
                self.secondary
                    .storage_set(settings)
                    .map_err(|secondary| FallbackError::Both { primary, secondary })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::{
        content::{TextProvider, page::PageSnapshot},
        platform::{MemoryPlatform, MemoryPlatformError, PlatformBridge},
        settings::SettingsStore,
    };

    fn offline(page: &str) -> MemoryPlatform {
        let mut platform = MemoryPlatform::with_pages([PageSnapshot::from_body(page)]);
        platform.set_available(false);
        platform
    }

    #[test]
    fn primary_answers_when_healthy() {
        let platform = FallbackPlatform::new(
            MemoryPlatform::with_pages([PageSnapshot::from_body("primary")]),
            MemoryPlatform::with_pages([PageSnapshot::from_body("secondary")]),
        );
        let mut bridge = PlatformBridge::new(platform);
        assert_eq!(block_on(bridge.selected_text()).unwrap(), "primary");
    }

    #[test]
    fn secondary_answers_when_primary_is_down() {
        let platform = FallbackPlatform::new(
            offline("primary"),
            MemoryPlatform::with_pages([PageSnapshot::from_body("secondary")]),
        );
        let mut bridge = PlatformBridge::new(platform);
        assert_eq!(block_on(bridge.selected_text()).unwrap(), "secondary");

        bridge.save(&PersistedSettings::new(640, true)).unwrap();
        assert_eq!(
            bridge.platform_mut().secondary_mut().storage().usable_wpm(),
            Some(640)
        );
    }

    #[test]
    fn primary_failure_is_not_masked() {
        let mut platform = FallbackPlatform::new(
            MemoryPlatform::with_pages([PageSnapshot::from_body("primary")]),
            MemoryPlatform::with_pages([PageSnapshot::from_body("secondary")]),
        );

        let reply = block_on(platform.send_message_to_tab(TabId(7), TabMessage::GetSelection));
        assert_eq!(
            reply,
            Err(FallbackError::Primary(MemoryPlatformError::NoSuchTab(TabId(7))))
        );
        assert!(!reply.unwrap_err().is_unavailable());
    }

    #[test]
    fn both_down_reports_both_errors() {
        let mut platform = FallbackPlatform::new(offline("a"), offline("b"));
        let err = platform.query_active_tab().unwrap_err();
        assert_eq!(
            err,
            FallbackError::Both {
                primary: MemoryPlatformError::Unavailable,
                secondary: MemoryPlatformError::Unavailable,
            }
        );
        assert!(err.is_unavailable());
    }
}
