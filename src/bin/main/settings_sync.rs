use log::{info, warn};
use quickread_core::settings::{PersistedSettings, SettingsStore};

use super::SETTINGS_RETRY_MS;

pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: PersistedSettings, now_ms: u64) {
        if current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, _)) if *pending == current => {}
            Some((pending, due_at_ms)) => {
                *pending = current;
                *due_at_ms = now_ms;
            }
            None => {
                self.pending = Some((current, now_ms));
            }
        }
    }

    pub(super) fn flush_if_due<S: SettingsStore>(&mut self, store: &mut S, now_ms: u64) {
        let Some((candidate, due_at_ms)) = self.pending else {
            return;
        };

        if now_ms < due_at_ms {
            return;
        }

        match store.save(&candidate) {
            Ok(()) => {
                info!(
                    "settings: saved wpm={} chunking={}",
                    candidate.wpm, candidate.chunking_enabled
                );
                self.last_saved = candidate;
                self.pending = None;
            }
            Err(err) => {
                warn!("settings: save failed, retrying: {:?}", err);
                self.pending = Some((candidate, now_ms.saturating_add(SETTINGS_RETRY_MS)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FlakyStore {
        fail_next: bool,
        saved: Vec<PersistedSettings>,
    }

    impl SettingsStore for FlakyStore {
        type Error = ();

        fn load(&mut self) -> Result<quickread_core::settings::StoredSettings, ()> {
            Ok(Default::default())
        }

        fn save(&mut self, settings: &PersistedSettings) -> Result<(), ()> {
            if core::mem::take(&mut self.fail_next) {
                return Err(());
            }
            self.saved.push(*settings);
            Ok(())
        }
    }

    #[test]
    fn changes_are_saved_right_away() {
        let mut sync = SettingsSyncState::new(PersistedSettings::new(300, true));
        let mut store = FlakyStore::default();

        sync.track_current(PersistedSettings::new(300, true), 0);
        sync.flush_if_due(&mut store, 0);
        assert!(store.saved.is_empty());

        sync.track_current(PersistedSettings::new(310, true), 5);
        sync.flush_if_due(&mut store, 5);
        assert_eq!(store.saved, vec![PersistedSettings::new(310, true)]);
    }

    #[test]
    fn failed_save_retries_after_backoff() {
        let mut sync = SettingsSyncState::new(PersistedSettings::new(300, true));
        let mut store = FlakyStore {
            fail_next: true,
            ..Default::default()
        };

        sync.track_current(PersistedSettings::new(300, false), 10);
        sync.flush_if_due(&mut store, 10);
        assert!(store.saved.is_empty());

        sync.track_current(PersistedSettings::new(300, false), 11);
        sync.flush_if_due(&mut store, 11);
        assert!(store.saved.is_empty());

        sync.flush_if_due(&mut store, 10 + SETTINGS_RETRY_MS);
        assert_eq!(store.saved, vec![PersistedSettings::new(300, false)]);
    }

    #[test]
    fn reverting_drops_the_pending_save() {
        let mut sync = SettingsSyncState::new(PersistedSettings::new(300, true));
        let mut store = FlakyStore::default();

        sync.track_current(PersistedSettings::new(320, true), 0);
        sync.track_current(PersistedSettings::new(300, true), 1);
        sync.flush_if_due(&mut store, 2);
        assert!(store.saved.is_empty());
    }
}
