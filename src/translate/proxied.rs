use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, error, warn};

use super::health::{HealthReport, ProxyHealth};
use super::interface::{TranslationRequest, TranslationResult, TranslatorInterface};
use super::remote::remote_error;
use super::validation::validate_text;
use crate::config::ServiceConfig;
use crate::error::{ApiResponse, TranslatorError};

/// Client that goes through the proxy server. It never sees the service
/// credential; `processing_time_ms` is the proxy's upstream measurement.
#[derive(Debug, Clone)]
pub struct ProxiedTranslator {
    client: Client,
    translate_url: String,
    health_url: String,
}

impl ProxiedTranslator {
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let base = config.proxy_url.trim_end_matches('/');
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            translate_url: format!("{}/api/translate", base),
            health_url: format!("{}/api/health", base),
        })
    }

    async fn send_translation(&self, text: &str) -> Result<TranslationResult, TranslatorError> {
        debug!("Forwarding translation request to proxy {}", self.translate_url);

        let response = self
            .client
            .post(&self.translate_url)
            .header(ACCEPT, "application/json")
            .json(&TranslationRequest {
                text: text.to_string(),
            })
            .send()
            .await
            .map_err(|e| TranslatorError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TranslatorError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &body));
        }

        let envelope: ApiResponse<TranslationResult> = serde_json::from_str(&body)
            .map_err(|e| TranslatorError::Parse(e.to_string()))?;

        match envelope {
            ApiResponse {
                success: true,
                data: Some(result),
                ..
            } => Ok(result),
            ApiResponse { success: true, .. } => Err(TranslatorError::Parse(
                "missing translation data".to_string(),
            )),
            ApiResponse { error, .. } => Err(TranslatorError::Remote {
                status: status.as_u16(),
                message: error.unwrap_or_else(|| "Translation failed".to_string()),
            }),
        }
    }
}

#[async_trait]
impl TranslatorInterface for ProxiedTranslator {
    async fn translate(&self, text: &str) -> Result<TranslationResult, TranslatorError> {
        let text = validate_text(text)?;
        self.send_translation(text).await.map_err(|e| {
            error!("Translation error: {}", e);
            e
        })
    }

    async fn check_health(&self) -> HealthReport {
        let response = match self
            .client
            .get(&self.health_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Proxy unreachable: {}", e);
                return HealthReport::unavailable(e.to_string());
            }
        };

        match response.json::<ProxyHealth>().await {
            Ok(envelope) => envelope.into(),
            Err(e) => {
                warn!("Unreadable health response from proxy: {}", e);
                HealthReport::unavailable(e.to_string())
            }
        }
    }
}
