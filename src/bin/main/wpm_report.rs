use log::info;

use super::WPM_REPORT_INTERVAL_MS;

/// Periodic effective-rate log. Only time spent playing counts, so pauses and
/// idle stretches do not drag the rate down.
pub(super) struct WpmReport {
    words: u64,
    active_ms: u64,
    last_ms: u64,
}

impl WpmReport {
    pub(super) fn new(now_ms: u64) -> Self {
        Self {
            words: 0,
            active_ms: 0,
            last_ms: now_ms,
        }
    }

    /// Adds `words` shown since the last call. `playing` says whether the
    /// reader was playing over that stretch. Returns the rate in hundredths of
    /// a word per minute when a report was logged.
    pub(super) fn record(&mut self, words: u32, playing: bool, now_ms: u64) -> Option<u64> {
        let step_ms = now_ms.saturating_sub(self.last_ms);
        self.last_ms = now_ms;
        if playing {
            self.active_ms = self.active_ms.saturating_add(step_ms);
        }
        self.words = self.words.saturating_add(words as u64);

        if self.active_ms < WPM_REPORT_INTERVAL_MS {
            return None;
        }

        let wpm_x100 = self.words * 6_000_000 / self.active_ms;
        if self.words > 0 {
            info!(
                "effective_wpm={}.{:02} words={} active_ms={}",
                wpm_x100 / 100,
                wpm_x100 % 100,
                self.words,
                self.active_ms
            );
        }

        self.words = 0;
        self.active_ms = 0;
        (wpm_x100 > 0).then_some(wpm_x100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_after_enough_playing_time() {
        let mut report = WpmReport::new(0);
        let mut now = 0;
        for _ in 0..49 {
            now += 100;
            assert_eq!(report.record(1, true, now), None);
        }
        assert_eq!(report.record(1, true, now + 100), Some(60_000));
    }

    #[test]
    fn paused_time_is_not_counted() {
        let mut report = WpmReport::new(0);
        assert_eq!(report.record(25, true, 2_500), None);
        // Ten seconds paused.
        assert_eq!(report.record(0, false, 12_500), None);
        assert_eq!(report.record(25, true, 15_000), Some(60_000));
    }

    #[test]
    fn idle_session_stays_quiet() {
        let mut report = WpmReport::new(0);
        assert_eq!(report.record(0, false, 60_000), None);
        assert_eq!(report.record(0, true, 66_000), None);
        // The window restarted after the empty report.
        assert_eq!(report.record(10, true, 67_000), None);
    }
}
