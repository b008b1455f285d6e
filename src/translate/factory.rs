use std::sync::Arc;
use anyhow::Result;
use tracing::info;

use super::interface::TranslatorInterface;
use super::proxied::ProxiedTranslator;
use super::remote::RemoteTranslator;
use crate::config::{ServiceConfig, TransportMode};

/// Builds the translation client for the configured transport
pub struct TranslatorFactory;

impl TranslatorFactory {
    pub fn create(config: &ServiceConfig) -> Result<Arc<dyn TranslatorInterface>> {
        match config.transport {
            TransportMode::Direct => {
                info!("Using direct transport: {}", config.base_url);
                Ok(Arc::new(RemoteTranslator::new(config)?))
            }
            TransportMode::Proxied => {
                info!("Using proxied transport: {}", config.proxy_url);
                Ok(Arc::new(ProxiedTranslator::new(config)?))
            }
        }
    }
}
