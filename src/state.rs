use std::sync::Arc;
use uuid::Uuid;

use crate::config::Config;
use crate::translate::{RemoteTranslator, TranslatorInterface};

/// Shared state of the proxy server
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Always the direct client: the proxy is what holds the credential
    pub upstream: Arc<dyn TranslatorInterface>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let upstream = Arc::new(RemoteTranslator::new(&config.service_config)?);
        Ok(Self::with_upstream(config, upstream))
    }

    pub fn with_upstream(config: Config, upstream: Arc<dyn TranslatorInterface>) -> Self {
        Self { config, upstream }
    }

    pub fn generate_request_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
