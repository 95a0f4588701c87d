//! Playback state machine: loads text, walks the chunk sequence on a pacing
//! timer, and reports every step to a [`DisplaySink`].
//!
//! The controller never blocks and never spawns. Time comes in as `now_ms`
//! arguments, the pacing timer is a single slot polled through
//! [`ReaderController::tick`] (or delivered through
//! [`ReaderController::timer_fired`]), and fetching text is split into
//! [`ReaderController::start`], which hands out a [`FetchTicket`], and
//! [`ReaderController::complete_fetch`], which only accepts the ticket that is
//! still current.

use alloc::{string::String, vec::Vec};

use log::{debug, info, warn};

use crate::{
    content::{Chunk, TextProvider, chunk_tokens, single_word_chunks, tokenize},
    input::InputEvent,
    pacing::{Wpm, chunk_delay_ms},
    render::{DisplaySink, Frame, IDLE_COUNTER, IDLE_MESSAGE},
    settings::{PersistedSettings, StoredSettings},
    text_policy::{counter_label, loaded_status, preview_compact, progress_pct},
};

mod timer;

pub use timer::{PacingTimer, TimerHandle};

pub const WPM_STEP: u16 = 10;

pub const STATUS_READY: &str = "Ready - select text on page first";
pub const STATUS_FETCHING: &str = "Fetching selected text...";
pub const STATUS_NO_TEXT: &str = "No text selected. Select text on the page first.";
pub const STATUS_FINISHED: &str = "Finished!";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
    pub chunking_enabled: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            min_wpm: 100,
            max_wpm: 1000,
            chunking_enabled: true,
        }
    }
}

/// Identifies one outstanding text fetch.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FetchTicket(u32);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackPhase {
    /// No chunks loaded.
    Empty,
    /// Still empty, waiting for the text fetch identified by `ticket`.
    Fetching { ticket: FetchTicket },
    /// Chunks loaded, paused.
    Ready,
    /// A pacing timer is armed for the next step.
    Playing,
    /// Every chunk has been shown.
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StartOutcome {
    /// Text must be fetched; resolve with [`ReaderController::complete_fetch`].
    FetchRequested(FetchTicket),
    /// A fetch is already outstanding; nothing changed.
    AlreadyFetching,
    Started,
    AlreadyPlaying,
    /// Nothing left to show.
    AlreadyFinished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FetchOutcome {
    Loaded { words: usize, chunks: usize },
    NoText,
    /// The ticket was no longer current; nothing changed.
    Stale,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    Idle,
    Advanced,
    Finished,
}

/// What the caller has to do after an input event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEffect {
    None,
    FetchRequested(FetchTicket),
    /// Persisted settings changed and should be saved.
    SettingsChanged,
}

/// Everything that changes while reading.
#[derive(Clone, Debug)]
pub struct PlaybackState {
    chunks: Vec<Chunk>,
    current_index: usize,
    phase: PlaybackPhase,
    timer: PacingTimer,
}

impl PlaybackState {
    const fn new() -> Self {
        Self {
            chunks: Vec::new(),
            current_index: 0,
            phase: PlaybackPhase::Empty,
            timer: PacingTimer::new(),
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Index of the next chunk to show, in `0..=chunks.len()`.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.timer.pending()
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    fn check_invariants(&self) {
        debug_assert!(self.current_index <= self.chunks.len());
        if self.chunks.is_empty() {
            debug_assert_eq!(self.current_index, 0);
            debug_assert!(matches!(
                self.phase,
                PlaybackPhase::Empty | PlaybackPhase::Fetching { .. }
            ));
        }
        debug_assert_eq!(
            self.timer.pending().is_some(),
            self.phase == PlaybackPhase::Playing
        );
    }
}

pub struct ReaderController<D>
where
    D: DisplaySink,
{
    display: D,
    wpm: Wpm,
    min_wpm: Wpm,
    max_wpm: Wpm,
    chunking_enabled: bool,
    state: PlaybackState,
    next_ticket: u32,
    words_since_drain: u32,
}

include!("view.rs");
include!("input.rs");
include!("runtime.rs");
