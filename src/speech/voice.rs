use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Label recorded when playback falls back to the platform's default voice.
pub const DEFAULT_VOICE_LABEL: &str = "System default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    pub fn is_english(&self) -> bool {
        self.lang.to_lowercase().starts_with("en")
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.lang)
    }
}

/// Pick a voice uniformly at random, preferring English ones.
///
/// Falls back to the whole list when no English voice exists and returns
/// `None` only when `voices` is empty.
pub fn select_voice<'a, R>(voices: &'a [Voice], rng: &mut R) -> Option<&'a Voice>
where
    R: Rng + ?Sized,
{
    let english: Vec<&Voice> = voices.iter().filter(|v| v.is_english()).collect();
    if english.is_empty() {
        voices.choose(rng)
    } else {
        english.choose(rng).copied()
    }
}

/// Display label for a selection.
pub fn selection_label(voice: Option<&Voice>) -> String {
    voice
        .map(Voice::label)
        .unwrap_or_else(|| DEFAULT_VOICE_LABEL.to_string())
}
