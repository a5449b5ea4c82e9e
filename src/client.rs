use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::speech::{SpeechController, SpeechPlayer, UtteranceRequest};

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    #[serde(rename = "presetId")]
    preset_id: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateReply {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Calls the generation endpoint and hands the result to speech playback.
pub struct GenerateClient {
    client: Client,
    base_url: String,
    loading: Arc<Mutex<HashSet<String>>>,
}

/// Marks a preset as in flight until dropped.
struct LoadingGuard {
    loading: Arc<Mutex<HashSet<String>>>,
    preset_id: String,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.preset_id);
    }
}

impl GenerateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            loading: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn is_loading(&self, preset_id: &str) -> bool {
        self.loading
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(preset_id)
    }

    /// Request text for a preset. Empty text counts as a failure.
    pub async fn generate_text(&self, preset_id: &str) -> Result<String, AppError> {
        let response = self
            .client
            .post(format!("{}/api/generate-text", self.base_url))
            .json(&GenerateBody { preset_id })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let reply: GenerateReply = serde_json::from_slice(&bytes).unwrap_or_default();

        match reply.text {
            Some(text) if status.is_success() && !text.is_empty() => Ok(text),
            _ => Err(AppError::Generation(
                reply.error.unwrap_or_else(|| "Generation failed".to_string()),
            )),
        }
    }

    /// Generate text for a preset and speak it right away.
    ///
    /// Only one generation per preset may be in flight; a second call for the
    /// same preset fails with [`AppError::Busy`] without issuing a request.
    pub async fn generate_and_speak<P: SpeechPlayer>(
        &self,
        preset_id: &str,
        speech: &SpeechController<P>,
    ) -> Result<UtteranceRequest, AppError> {
        let _guard = self.begin(preset_id)?;

        match self.generate_text(preset_id).await {
            Ok(text) => Ok(speech.speak(&text)),
            Err(e) => {
                tracing::error!("TTS error: {}", e);
                Err(e)
            }
        }
    }

    fn begin(&self, preset_id: &str) -> Result<LoadingGuard, AppError> {
        let mut loading = self.loading.lock().unwrap_or_else(PoisonError::into_inner);
        if !loading.insert(preset_id.to_string()) {
            return Err(AppError::Busy(preset_id.to_string()));
        }
        Ok(LoadingGuard {
            loading: Arc::clone(&self.loading),
            preset_id: preset_id.to_string(),
        })
    }
}
