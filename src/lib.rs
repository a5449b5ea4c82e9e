//! Preset-driven text generation with randomized voice playback.
//!
//! The server side resolves a preset, asks a hosted model for a short snippet and
//! returns it as JSON. The speech and audio modules hold the playback decisions
//! that run next to the host's synthesis engine.

pub mod api;
pub mod audio;
pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod presets;
pub mod speech;
