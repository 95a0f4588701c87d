#![cfg_attr(not(test), no_std)]

//! Chunking, pacing and playback core for the quickread speed reader.
//!
//! Everything here is host-agnostic: text arrives through
//! [`content::TextProvider`], preferences through [`settings::SettingsStore`],
//! and output leaves through [`render::DisplaySink`].

extern crate alloc;

pub mod app;
pub mod content;
pub mod input;
pub mod pacing;
pub mod platform;
pub mod render;
pub mod settings;
pub mod text_policy;
