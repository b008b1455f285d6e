pub mod interface;
pub mod validation;
pub mod health;
pub mod remote;
pub mod proxied;
pub mod factory;

pub use interface::{TranslationRequest, TranslationResult, TranslatorInterface};
pub use validation::{validate_text, MAX_TEXT_LENGTH};
pub use health::{HealthReport, ProxyHealth, ServiceHealth};
pub use remote::RemoteTranslator;
pub use proxied::ProxiedTranslator;
pub use factory::TranslatorFactory;
