//! Input abstraction layer.

mod mock;

pub use mock::{MockInput, ScriptedInput};

/// Logical commands consumed by the reader.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    Start,
    Pause,
    /// Start when stopped, pause when playing.
    TogglePlayback,
    Reset,
    IncreaseWpm,
    DecreaseWpm,
    SetWpm(u16),
    ToggleChunking,
    SetChunking(bool),
}

/// Polled input provider.
pub trait InputProvider {
    type Error: core::fmt::Debug;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
