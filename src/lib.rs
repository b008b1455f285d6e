pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod routes;
pub mod state;
pub mod translate;

pub use config::Config;
pub use controller::{TranslatorController, ViewState};
pub use error::{ApiResponse, ErrorKind, TranslatorError};
pub use history::{HistoryCache, HistoryEntry};
pub use state::AppState;
pub use translate::{HealthReport, ServiceHealth, TranslationResult, TranslatorInterface};
