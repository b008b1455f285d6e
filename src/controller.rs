use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::history::{HistoryCache, HistoryEntry};
use crate::translate::{HealthReport, TranslatorInterface, MAX_TEXT_LENGTH};

/// Everything a front end needs to render. Owned by the controller; no
/// rendering happens here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub input: String,
    pub output: String,
    pub error: Option<String>,
    pub loading: bool,
    pub copy_enabled: bool,
    pub processing_time_ms: Option<u64>,
    pub health: Option<HealthReport>,
}

/// Wires user actions to the translation client and the history cache
pub struct TranslatorController {
    translator: Arc<dyn TranslatorInterface>,
    history: Arc<RwLock<HistoryCache>>,
    view: ViewState,
}

impl TranslatorController {
    pub fn new(translator: Arc<dyn TranslatorInterface>, history: Arc<RwLock<HistoryCache>>) -> Self {
        Self {
            translator,
            history,
            view: ViewState::default(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn history(&self) -> Arc<RwLock<HistoryCache>> {
        self.history.clone()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.view.input = text.into();
    }

    /// Length of the raw input, as shown in the live counter
    pub fn char_count(&self) -> usize {
        self.view.input.chars().count()
    }

    pub fn is_over_limit(&self) -> bool {
        self.char_count() > MAX_TEXT_LENGTH
    }

    /// Translate the current input. Returns whether a translation was shown.
    pub async fn translate(&mut self) -> bool {
        let text = self.view.input.trim().to_string();

        if text.is_empty() {
            self.show_error("Please enter some text to translate");
            return false;
        }
        if text.chars().count() > MAX_TEXT_LENGTH {
            self.show_error(format!(
                "Text is too long (maximum {} characters)",
                MAX_TEXT_LENGTH
            ));
            return false;
        }

        self.view.loading = true;
        self.view.error = None;

        let result = self.translator.translate(&text).await;

        let shown = match result {
            Ok(result) => {
                self.view.output = result.translated_text.clone();
                self.view.copy_enabled = true;
                self.view.processing_time_ms = Some(result.processing_time_ms);

                let entry = HistoryEntry::new(result.original_text, result.translated_text);
                if let Err(e) = self.with_history(move |cache| cache.add(entry)).await {
                    warn!("Failed to save translation history: {}", e);
                }
                true
            }
            Err(e) => {
                error!("Translation failed: {}", e);
                self.show_error(e.to_string());
                self.view.output.clear();
                self.view.copy_enabled = false;
                self.view.processing_time_ms = None;
                false
            }
        };

        self.view.loading = false;
        shown
    }

    pub async fn refresh_health(&mut self) -> &HealthReport {
        let report = self.translator.check_health().await;
        info!("{}", report.status);
        self.view.health.insert(report)
    }

    pub fn dismiss_error(&mut self) {
        self.view.error = None;
    }

    pub fn clear_input(&mut self) {
        self.view.input.clear();
        self.view.output.clear();
        self.view.copy_enabled = false;
        self.view.processing_time_ms = None;
    }

    /// Put a past translation back into the input and output fields
    pub async fn restore(&mut self, index: usize) -> bool {
        let entry = match self.history.read().await.get(index) {
            Some(entry) => entry.clone(),
            None => return false,
        };
        self.view.input = entry.source;
        self.view.output = entry.target;
        self.view.copy_enabled = true;
        true
    }

    /// Clear the history once the user has confirmed. Unconfirmed requests
    /// leave it untouched and return `Ok(false)`.
    pub async fn clear_history(&mut self, confirmed: bool) -> anyhow::Result<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.with_history(|cache| cache.clear()).await?;
        info!("Translation history cleared");
        Ok(true)
    }

    /// Text to put on the clipboard, if copying is currently allowed
    pub fn copy_text(&self) -> Option<&str> {
        if self.view.copy_enabled && !self.view.output.is_empty() {
            Some(&self.view.output)
        } else {
            None
        }
    }

    /// Run a mutating history operation on the blocking pool, holding the
    /// write lock across modify and persist
    async fn with_history<F>(&self, op: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut HistoryCache) -> anyhow::Result<()> + Send + 'static,
    {
        let history = self.history.clone();
        tokio::task::spawn_blocking(move || op(&mut history.blocking_write())).await?
    }

    fn show_error(&mut self, message: impl Into<String>) {
        self.view.error = Some(message.into());
    }
}
