use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::health::HealthReport;
use crate::error::TranslatorError;

/// Body sent to the translate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
}

/// Success body of the remote translate endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteTranslation {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A completed translation together with the observed round-trip latency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    /// Epoch millis
    pub timestamp: i64,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
}

impl TranslationResult {
    pub fn from_remote(remote: RemoteTranslation, processing_time_ms: u64) -> Self {
        Self {
            original_text: remote.original_text,
            translated_text: remote.translated_text,
            source_language: remote.source_language,
            target_language: remote.target_language,
            timestamp: remote
                .timestamp
                .unwrap_or_else(|| chrono::Utc::now().timestamp_millis()),
            processing_time_ms,
        }
    }
}

/// A translation backend reachable over some transport
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    /// Translate English text to Darija.
    ///
    /// The text is trimmed and validated first; invalid input never reaches
    /// the network.
    async fn translate(&self, text: &str) -> Result<TranslationResult, TranslatorError>;

    /// Probe the service and report whether it is reachable
    async fn check_health(&self) -> HealthReport;
}
