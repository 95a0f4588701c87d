//! Display sinks for terminals and plain output streams.

mod lines;
pub mod orp;
mod terminal;

pub use lines::LineDisplay;
pub use terminal::{TerminalDisplay, TerminalGuard};
