impl<D> ReaderController<D>
where
    D: DisplaySink,
{
    /// Creates an empty controller and shows the idle frame.
    pub fn new(display: D, config: ReaderConfig) -> Self {
        let min_wpm = Wpm::new(config.min_wpm.max(1)).unwrap_or(Wpm::MIN);
        let max_wpm = Wpm::new(config.max_wpm.max(1)).unwrap_or(Wpm::MIN);
        let (min_wpm, max_wpm) = if max_wpm < min_wpm {
            (max_wpm, min_wpm)
        } else {
            (min_wpm, max_wpm)
        };

        let mut controller = Self {
            display,
            wpm: Wpm::clamped(config.wpm as u32, min_wpm, max_wpm),
            min_wpm,
            max_wpm,
            chunking_enabled: config.chunking_enabled,
            state: PlaybackState::new(),
            next_ticket: 0,
            words_since_drain: 0,
        };
        controller.show_idle();
        controller
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.state.phase
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn wpm(&self) -> Wpm {
        self.wpm
    }

    pub fn chunking_enabled(&self) -> bool {
        self.chunking_enabled
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn persisted_settings(&self) -> PersistedSettings {
        PersistedSettings::new(self.wpm.get(), self.chunking_enabled)
    }

    /// Tells the display its width changed and draws the current frame again.
    pub fn resize_display(&mut self, columns: u16) {
        self.display.resize(columns);
        let shown = self.state.current_index.checked_sub(1);
        if !shown.is_some_and(|index| self.draw_chunk(index)) {
            self.show_idle();
        }
    }

    /// Words shown since the previous call.
    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.words_since_drain)
    }

    fn show_idle(&mut self) {
        self.display.show(Frame::Idle {
            message: IDLE_MESSAGE,
            counter: IDLE_COUNTER,
        });
    }

    fn draw_chunk(&mut self, index: usize) -> bool {
        let total = self.state.chunks.len();
        let Some(chunk) = self.state.chunks.get(index) else {
            return false;
        };
        let counter = counter_label(index + 1, total);

        self.display.show(Frame::Chunk {
            text: chunk.text(),
            progress_pct: progress_pct(index + 1, total),
            counter: counter.as_str(),
            wpm: self.wpm.get(),
        });
        true
    }

    /// Shows the chunk at `index` and returns its display duration.
    fn show_chunk(&mut self, index: usize) -> Option<u32> {
        if !self.draw_chunk(index) {
            return None;
        }
        let chunk = self.state.chunks.get(index)?;

        self.words_since_drain = self
            .words_since_drain
            .saturating_add(chunk.word_count() as u32);
        Some(chunk_delay_ms(chunk, self.wpm))
    }
}
