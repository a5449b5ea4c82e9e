pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::presets::Preset;

#[derive(Debug, Default, Deserialize)]
pub struct GenerateTextRequest {
    #[serde(rename = "presetId", default)]
    pub preset_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateTextResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub presets: &'static [Preset],
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
}
