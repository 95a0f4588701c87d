//! Desktop glue for quickread: terminal output, keyboard input, and
//! file-backed documents and settings.

mod error;
pub mod input;
pub mod platform;
pub mod render;
pub mod storage;

pub use error::HostError;
