pub mod preferences;
#[cfg(feature = "audio-playback")]
pub mod track;

use crate::error::AppError;

pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
#[cfg(feature = "audio-playback")]
pub use track::RodioTrack;

/// Storage key of the background music preference.
pub const PREFERENCE_KEY: &str = "bg-audio-enabled";

pub const BACKGROUND_VOLUME: f32 = 0.4;

/// A single looping media element. A failed `play` means the host refused to start playback.
pub trait AudioElement {
    fn set_volume(&mut self, volume: f32);
    fn set_looping(&mut self, looping: bool);
    fn play(&mut self) -> Result<(), AppError>;
    fn pause(&mut self);
}

/// Background music switch whose on/off choice is remembered between sessions.
pub struct BackgroundAudio<E: AudioElement, S: PreferenceStore> {
    element: E,
    store: S,
    playing: bool,
}

impl<E: AudioElement, S: PreferenceStore> BackgroundAudio<E, S> {
    pub fn new(element: E, store: S) -> Self {
        Self {
            element,
            store,
            playing: false,
        }
    }

    /// Autoplay on load unless the user previously switched music off.
    pub fn start(&mut self) -> bool {
        if self.store.get(PREFERENCE_KEY).as_deref() == Some("false") {
            return false;
        }

        self.element.set_volume(BACKGROUND_VOLUME);
        self.element.set_looping(true);
        self.playing = match self.element.play() {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Background autoplay refused: {}", e);
                false
            }
        };
        self.playing
    }

    /// Flip playback and remember the choice. Returns whether music is now playing.
    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.element.pause();
            self.playing = false;
            self.persist("false");
            return false;
        }

        self.element.set_volume(BACKGROUND_VOLUME);
        self.element.set_looping(true);
        match self.element.play() {
            Ok(()) => {
                self.playing = true;
                self.persist("true");
            }
            Err(e) => {
                tracing::debug!("Background playback refused: {}", e);
                self.playing = false;
            }
        }
        self.playing
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    fn persist(&self, value: &str) {
        if let Err(e) = self.store.set(PREFERENCE_KEY, value) {
            tracing::warn!("Failed to save background audio preference: {}", e);
        }
    }
}
