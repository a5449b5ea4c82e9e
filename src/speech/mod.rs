//! Voice selection and speech playback control.
//!
//! The synthesis engine itself belongs to the host. This module only decides
//! which voice to use and keeps a single utterance active at a time.

pub mod catalog;
pub mod player;
pub mod voice;

pub use catalog::{InMemoryVoiceCatalog, Subscription, VoiceCatalog, VoicesListener};
pub use player::{SpeechController, SpeechPlayer, UtteranceRequest};
pub use voice::{select_voice, selection_label, Voice, DEFAULT_VOICE_LABEL};
