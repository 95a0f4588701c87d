impl<D> ReaderController<D>
where
    D: DisplaySink,
{
    /// Fires the pacing timer when its deadline has passed. The next deadline
    /// counts from the one that fired, so late ticks do not add up.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        let due_ms = self.state.timer.deadline_ms();
        if self.state.timer.fire_due(now_ms).is_none() {
            return TickResult::Idle;
        }

        self.advance(due_ms.unwrap_or(now_ms), now_ms)
    }

    /// Delivers a timer firing from an external scheduler. Handles that are
    /// not the one currently armed are ignored.
    pub fn timer_fired(&mut self, handle: TimerHandle, now_ms: u64) -> TickResult {
        let due_ms = self.state.timer.deadline_ms();
        if !self.state.timer.claim(handle) {
            debug!("reader: ignoring stale timer {:?}", handle);
            return TickResult::Idle;
        }

        self.advance(due_ms.unwrap_or(now_ms), now_ms)
    }

    fn begin_playback(&mut self, now_ms: u64) -> StartOutcome {
        if self.state.current_index >= self.state.chunks.len() {
            self.finish();
            return StartOutcome::AlreadyFinished;
        }

        self.state.phase = PlaybackPhase::Playing;
        debug!(
            "reader: playing from index={} wpm={}",
            self.state.current_index,
            self.wpm.get()
        );
        self.advance(now_ms, now_ms);
        StartOutcome::Started
    }

    /// Shows the next chunk and arms the timer for its duration after
    /// `due_ms`, or finishes when nothing is left. A deadline that would
    /// already be behind `now_ms` restarts the count from `now_ms`.
    fn advance(&mut self, due_ms: u64, now_ms: u64) -> TickResult {
        if self.state.phase != PlaybackPhase::Playing {
            self.state.timer.cancel();
            return TickResult::Idle;
        }

        let index = self.state.current_index;
        let Some(delay_ms) = self.show_chunk(index) else {
            self.finish();
            return TickResult::Finished;
        };

        self.state.current_index = index + 1;
        let mut deadline_ms = due_ms.saturating_add(delay_ms as u64);
        if deadline_ms <= now_ms {
            deadline_ms = now_ms.saturating_add(delay_ms as u64);
        }
        self.state.timer.arm(deadline_ms);
        self.state.check_invariants();
        TickResult::Advanced
    }

    fn finish(&mut self) {
        self.state.timer.cancel();
        self.state.phase = PlaybackPhase::Finished;
        self.display.set_status(STATUS_FINISHED);
        info!("reader: finished {} chunks", self.state.chunks.len());
        self.state.check_invariants();
    }
}
