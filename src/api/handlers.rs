use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use super::{GenerateTextRequest, GenerateTextResponse, HealthResponse, PresetsResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::presets;

pub async fn generate_text(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateTextResponse>, AppError> {
    // Unparseable bodies fall through to the default preset
    let request: GenerateTextRequest = serde_json::from_slice(&body).unwrap_or_default();

    let preset = presets::resolve(request.preset_id.as_deref());
    let prompt = presets::build_prompt(preset);

    tracing::info!(
        requested = request.preset_id.as_deref().unwrap_or("<none>"),
        preset = preset.id,
        "Generating text"
    );

    let text = state.generator.generate(&prompt).await?;

    Ok(Json(GenerateTextResponse {
        text: text.map(|t| t.trim().to_string()).unwrap_or_default(),
    }))
}

pub async fn list_presets() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        presets: presets::all(),
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.generator.model().to_string(),
    })
}
