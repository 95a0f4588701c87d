impl<D> ReaderController<D>
where
    D: DisplaySink,
{
    pub fn apply_input(&mut self, event: InputEvent, now_ms: u64) -> InputEffect {
        match event {
            InputEvent::Start => self.start_effect(now_ms),
            InputEvent::Pause => {
                self.pause();
                InputEffect::None
            }
            InputEvent::TogglePlayback => {
                if self.is_playing() {
                    self.pause();
                    InputEffect::None
                } else {
                    self.start_effect(now_ms)
                }
            }
            InputEvent::Reset => {
                self.reset();
                InputEffect::None
            }
            InputEvent::IncreaseWpm => settings_effect(self.adjust_wpm(true)),
            InputEvent::DecreaseWpm => settings_effect(self.adjust_wpm(false)),
            InputEvent::SetWpm(wpm) => settings_effect(self.set_wpm(wpm as u32)),
            InputEvent::ToggleChunking => {
                let enabled = !self.chunking_enabled;
                settings_effect(self.set_chunking(enabled))
            }
            InputEvent::SetChunking(enabled) => settings_effect(self.set_chunking(enabled)),
        }
    }

    fn start_effect(&mut self, now_ms: u64) -> InputEffect {
        match self.start(now_ms) {
            StartOutcome::FetchRequested(ticket) => InputEffect::FetchRequested(ticket),
            _ => InputEffect::None,
        }
    }

    /// Starts or resumes reading.
    ///
    /// From [`PlaybackPhase::Empty`] this only requests text; playback begins
    /// once the returned ticket is passed to [`Self::complete_fetch`].
    pub fn start(&mut self, now_ms: u64) -> StartOutcome {
        let outcome = match self.state.phase {
            PlaybackPhase::Empty => {
                let ticket = self.issue_ticket();
                self.state.phase = PlaybackPhase::Fetching { ticket };
                self.display.set_status(STATUS_FETCHING);
                debug!("reader: fetch requested ticket={:?}", ticket);
                StartOutcome::FetchRequested(ticket)
            }
            PlaybackPhase::Fetching { .. } => StartOutcome::AlreadyFetching,
            PlaybackPhase::Playing => StartOutcome::AlreadyPlaying,
            PlaybackPhase::Ready | PlaybackPhase::Finished => self.begin_playback(now_ms),
        };

        self.state.check_invariants();
        outcome
    }

    /// Loads fetched `text` if `ticket` is still the outstanding fetch, then
    /// starts playing.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, text: &str, now_ms: u64) -> FetchOutcome {
        if self.state.phase != (PlaybackPhase::Fetching { ticket }) {
            debug!(
                "reader: dropping stale fetch ticket={:?} phase={:?}",
                ticket, self.state.phase
            );
            return FetchOutcome::Stale;
        }

        let tokens = tokenize(text);
        if tokens.is_empty() {
            self.state.phase = PlaybackPhase::Empty;
            self.display.set_status(STATUS_NO_TEXT);
            info!("reader: no text to read");
            self.state.check_invariants();
            return FetchOutcome::NoText;
        }

        let chunks = if self.chunking_enabled {
            chunk_tokens(&tokens)
        } else {
            single_word_chunks(&tokens)
        };
        let words = tokens.len();
        let chunk_count = chunks.len();

        info!(
            "reader: loaded words={} chunks={} chunking={} preview=\"{}\"",
            words,
            chunk_count,
            self.chunking_enabled,
            preview_compact(text).as_str()
        );

        self.state.chunks = chunks;
        self.state.current_index = 0;
        self.state.phase = PlaybackPhase::Ready;
        let status = loaded_status(words, self.chunking_enabled.then_some(chunk_count));
        self.display.set_status(status.as_str());

        self.begin_playback(now_ms);
        self.state.check_invariants();

        FetchOutcome::Loaded {
            words,
            chunks: chunk_count,
        }
    }

    /// Runs a whole Start against `provider`: requests text, awaits it, and
    /// loads it. Returns `None` when no fetch was needed.
    ///
    /// Provider errors are logged and read as "no text".
    pub async fn run_start<P, C>(&mut self, provider: &mut P, now_ms: C) -> Option<FetchOutcome>
    where
        P: TextProvider,
        C: Fn() -> u64,
    {
        let StartOutcome::FetchRequested(ticket) = self.start(now_ms()) else {
            return None;
        };

        let text = match provider.selected_text().await {
            Ok(text) => text,
            Err(err) => {
                warn!("reader: text provider failed: {:?}", err);
                String::new()
            }
        };

        Some(self.complete_fetch(ticket, &text, now_ms()))
    }

    /// Stops the pacing timer. While a fetch is outstanding, abandons it.
    ///
    /// Returns `false`, with no side effects, when there was nothing to pause.
    pub fn pause(&mut self) -> bool {
        let paused = match self.state.phase {
            PlaybackPhase::Playing => {
                self.state.timer.cancel();
                self.state.phase = PlaybackPhase::Ready;
                debug!("reader: paused at index={}", self.state.current_index);
                true
            }
            PlaybackPhase::Fetching { ticket } => {
                self.state.phase = PlaybackPhase::Empty;
                self.display.set_status(STATUS_READY);
                debug!("reader: abandoned fetch ticket={:?}", ticket);
                true
            }
            PlaybackPhase::Empty | PlaybackPhase::Ready | PlaybackPhase::Finished => false,
        };

        self.state.check_invariants();
        paused
    }

    /// Drops all loaded text and returns to [`PlaybackPhase::Empty`].
    pub fn reset(&mut self) {
        self.state.timer.cancel();
        self.state.chunks.clear();
        self.state.current_index = 0;
        self.state.phase = PlaybackPhase::Empty;

        self.show_idle();
        self.display.set_status(STATUS_READY);
        debug!("reader: reset");
        self.state.check_invariants();
    }

    /// Applies restored settings; missing keys keep their current value.
    pub fn apply_stored_settings(&mut self, stored: StoredSettings) {
        if let Some(wpm) = stored.usable_wpm() {
            self.set_wpm(wpm as u32);
        }
        if let Some(enabled) = stored.chunking_enabled {
            self.chunking_enabled = enabled;
        }
    }

    /// Sets the rate, clamped to the configured range. Takes effect from the
    /// next chunk shown. Returns whether the rate changed.
    pub fn set_wpm(&mut self, raw: u32) -> bool {
        let next = Wpm::clamped(raw, self.min_wpm, self.max_wpm);
        if next == self.wpm {
            return false;
        }

        debug!("reader: wpm {} -> {}", self.wpm.get(), next.get());
        self.wpm = next;
        true
    }

    pub fn adjust_wpm(&mut self, increase: bool) -> bool {
        let current = self.wpm.get() as u32;
        let next = if increase {
            current.saturating_add(WPM_STEP as u32)
        } else {
            current.saturating_sub(WPM_STEP as u32)
        };
        self.set_wpm(next)
    }

    /// Chooses how the next loaded text is split. Already loaded chunks are
    /// kept as they are.
    pub fn set_chunking(&mut self, enabled: bool) -> bool {
        if self.chunking_enabled == enabled {
            return false;
        }

        self.chunking_enabled = enabled;
        true
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.next_ticket = self.next_ticket.wrapping_add(1);
        FetchTicket(self.next_ticket)
    }
}

fn settings_effect(changed: bool) -> InputEffect {
    if changed {
        InputEffect::SettingsChanged
    } else {
        InputEffect::None
    }
}
