//! Display-facing view models and the sink that consumes them.

use alloc::{string::String, vec::Vec};

/// Message shown while no text is loaded.
pub const IDLE_MESSAGE: &str = "Select text and click Start";
/// Counter shown while no text is loaded.
pub const IDLE_COUNTER: &str = "0 / 0";

/// One display update.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Frame<'a> {
    /// Nothing loaded; progress is zero.
    Idle {
        message: &'a str,
        counter: &'a str,
    },
    Chunk {
        text: &'a str,
        /// 0..=100
        progress_pct: u8,
        /// `"current / total"`, 1-based.
        counter: &'a str,
        wpm: u16,
    },
}

/// Receives everything the reader wants on screen.
pub trait DisplaySink {
    fn show(&mut self, frame: Frame<'_>);

    /// One-line status such as "Loaded 12 words" or "Finished!".
    fn set_status(&mut self, status: &str);

    /// The output area is now `columns` wide. Sinks without a fixed layout
    /// ignore this.
    fn resize(&mut self, _columns: u16) {}
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn show(&mut self, frame: Frame<'_>) {
        (**self).show(frame)
    }

    fn set_status(&mut self, status: &str) {
        (**self).set_status(status)
    }

    fn resize(&mut self, columns: u16) {
        (**self).resize(columns)
    }
}

/// Owned copy of a display update.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DisplayEvent {
    Idle {
        message: String,
        counter: String,
    },
    Chunk {
        text: String,
        progress_pct: u8,
        counter: String,
        wpm: u16,
    },
    Status(String),
}

/// Sink that keeps every update, for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct RecordingDisplay {
    events: Vec<DisplayEvent>,
}

impl RecordingDisplay {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[DisplayEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<DisplayEvent> {
        core::mem::take(&mut self.events)
    }

    /// Texts of every chunk shown so far.
    pub fn chunk_texts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DisplayEvent::Chunk { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_status(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            DisplayEvent::Status(status) => Some(status.as_str()),
            _ => None,
        })
    }
}

impl DisplaySink for RecordingDisplay {
    fn show(&mut self, frame: Frame<'_>) {
        let event = match frame {
            Frame::Idle { message, counter } => DisplayEvent::Idle {
                message: String::from(message),
                counter: String::from(counter),
            },
            Frame::Chunk {
                text,
                progress_pct,
                counter,
                wpm,
            } => DisplayEvent::Chunk {
                text: String::from(text),
                progress_pct,
                counter: String::from(counter),
                wpm,
            },
        };
        self.events.push(event);
    }

    fn set_status(&mut self, status: &str) {
        self.events.push(DisplayEvent::Status(String::from(status)));
    }
}
