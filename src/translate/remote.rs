use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, error, warn};

use super::health::{HealthBody, HealthReport};
use super::interface::{RemoteTranslation, TranslationRequest, TranslationResult, TranslatorInterface};
use super::validation::validate_text;
use crate::config::ServiceConfig;
use crate::error::TranslatorError;

/// Client that calls the translation service directly, carrying the shared
/// Basic credential on every request
#[derive(Debug, Clone)]
pub struct RemoteTranslator {
    client: Client,
    translate_url: String,
    health_url: String,
    username: String,
    password: String,
}

impl RemoteTranslator {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        if config.username.is_empty() {
            warn!("No username configured for the translation service");
        }

        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            translate_url: config.translate_endpoint(),
            health_url: config.health_endpoint(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    async fn send_translation(&self, text: &str) -> Result<TranslationResult, TranslatorError> {
        let request = TranslationRequest {
            text: text.to_string(),
        };

        debug!("Sending translation request ({} chars) to {}", text.chars().count(), self.translate_url);

        let started = Instant::now();
        let response = self
            .client
            .post(&self.translate_url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslatorError::Network(e.to_string()))?;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranslatorError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &body));
        }

        let remote: RemoteTranslation = serde_json::from_str(&body)
            .map_err(|e| TranslatorError::Parse(e.to_string()))?;

        debug!("Translation completed in {}ms", elapsed_ms);
        Ok(TranslationResult::from_remote(remote, elapsed_ms))
    }
}

#[async_trait]
impl TranslatorInterface for RemoteTranslator {
    async fn translate(&self, text: &str) -> Result<TranslationResult, TranslatorError> {
        let text = validate_text(text)?;
        self.send_translation(text).await.map_err(|e| {
            error!("Translation error: {}", e);
            e
        })
    }

    async fn check_health(&self) -> HealthReport {
        let result = self
            .client
            .get(&self.health_url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                let body: HealthBody = response.json().await.unwrap_or_default();
                HealthReport::online(body.status)
            }
            Ok(response) => {
                debug!("Health check returned {}", response.status());
                HealthReport::offline(format!("HTTP {}", response.status().as_u16()))
            }
            Err(e) => {
                warn!("Health check failed: {}", e);
                HealthReport::offline(e.to_string())
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

/// Build the error for a non-2xx response. An undecodable body counts as an
/// empty error object.
pub(crate) fn remote_error(status: u16, body: &str) -> TranslatorError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .error
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {}", status));
    TranslatorError::Remote { status, message }
}
