use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

/// Identifier of the preset used whenever a lookup misses.
pub const DEFAULT_PRESET_ID: &str = "greeting";

/// Appended verbatim to every prompt sent to the generator.
pub const PERSONALIZATION: &str = " Always include the name \"akash\" naturally in the text.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    pub prompt: &'static str,
}

static PRESETS: [Preset; 5] = [
    Preset {
        id: "greeting",
        title: "Warm Greeting",
        description: "Friendly hello addressed to akash.",
        prompt: "Write a brief, warm greeting that directly addresses a person named akash. Keep it to 2-3 sentences. Friendly, concise, and positive.",
    },
    Preset {
        id: "status",
        title: "Project Status",
        description: "Encouraging nudge for progress.",
        prompt: "Craft a short and encouraging project status nudge for akash. 2-3 sentences, supportive tone, no jargon.",
    },
    Preset {
        id: "onboarding",
        title: "Onboarding Welcome",
        description: "Short welcome for a new journey.",
        prompt: "Create a short onboarding welcome for akash. 2-3 sentences, clear and upbeat, avoid corporate clichés.",
    },
    Preset {
        id: "tip",
        title: "Daily Tip",
        description: "Quick, practical productivity tip.",
        prompt: "Share a quick, practical productivity tip addressed to akash. 2-3 sentences, conversational, no emojis.",
    },
    Preset {
        id: "reminder",
        title: "Gentle Reminder",
        description: "Kind reminder to pause and hydrate.",
        prompt: "Write a gentle reminder for akash to take a short break and hydrate. 2-3 sentences, kind and respectful.",
    },
];

lazy_static! {
    static ref PRESET_INDEX: HashMap<&'static str, &'static Preset> =
        PRESETS.iter().map(|preset| (preset.id, preset)).collect();
}

/// All presets in display order.
pub fn all() -> &'static [Preset] {
    &PRESETS
}

/// Look up a preset by exact id. Unknown or absent ids resolve to the greeting preset.
pub fn resolve(id: Option<&str>) -> &'static Preset {
    id.and_then(|id| PRESET_INDEX.get(id).copied())
        .unwrap_or(&PRESETS[0])
}

/// Final prompt handed to the generator for a preset.
pub fn build_prompt(preset: &Preset) -> String {
    format!("{}{}", preset.prompt, PERSONALIZATION)
}
