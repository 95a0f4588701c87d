//! Persistent storage backends.

pub mod settings_file;
