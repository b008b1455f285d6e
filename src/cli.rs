use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::Config;
use crate::controller::TranslatorController;
use crate::history::{HistoryCache, JsonFileStore};
use crate::routes;
use crate::state::AppState;
use crate::translate::TranslatorFactory;

/// Translate English into Moroccan Darija through the remote translation service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML or JSON(-LD) configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the proxy server that forwards requests with the service credential
    Serve,
    /// Translate TEXT, or standard input when TEXT is omitted
    Translate {
        text: Vec<String>,
    },
    /// Check whether the translation service is reachable
    Health,
    /// Show or clear the local translation history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List past translations, newest first
    List,
    /// Remove all past translations
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    let (config, loaded_from) = Config::discover(cli.config.as_deref())?;
    match loaded_from {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }

    match cli.command {
        Command::Serve => serve(config).await,
        Command::Translate { text } => translate(&config, text).await,
        Command::Health => health(&config).await,
        Command::History { action } => history(&config, action).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    let host = config.system_config.host.clone();
    let port = config.system_config.port;
    let app = routes::build_app(AppState::new(config)?);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!("Starting server on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_controller(config: &Config) -> Result<TranslatorController> {
    let translator = TranslatorFactory::create(&config.service_config)?;
    let store = Arc::new(JsonFileStore::new(config.history_config.storage_path()));
    let history = Arc::new(RwLock::new(HistoryCache::load(store)?));
    Ok(TranslatorController::new(translator, history))
}

async fn translate(config: &Config, words: Vec<String>) -> Result<()> {
    let input = if words.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        words.join(" ")
    };

    let mut controller = build_controller(config)?;
    controller.set_input(input);
    if controller.is_over_limit() {
        eprintln!("Warning: input has {} characters", controller.char_count());
    }

    if controller.translate().await {
        let view = controller.view();
        println!("{}", view.output);
        if let Some(ms) = view.processing_time_ms {
            eprintln!("Translated in {}ms", ms);
        }
        Ok(())
    } else {
        let message = controller
            .view()
            .error
            .clone()
            .unwrap_or_else(|| "Translation failed".to_string());
        anyhow::bail!(message)
    }
}

async fn health(config: &Config) -> Result<()> {
    let mut controller = build_controller(config)?;
    let report = controller.refresh_health().await;
    match &report.message {
        Some(message) => println!("{} ({})", report.status, message),
        None => println!("{}", report.status),
    }
    Ok(())
}

async fn history(config: &Config, action: HistoryAction) -> Result<()> {
    let mut controller = build_controller(config)?;

    match action {
        HistoryAction::List => {
            let history = controller.history();
            let cache = history.read().await;
            if cache.is_empty() {
                println!("No translation history");
                return Ok(());
            }
            let now = chrono::Utc::now();
            for (index, entry) in cache.list().iter().enumerate() {
                println!("[{}] {}", index, entry.source);
                println!("    {}  ({})", entry.target, entry.relative_time(now));
            }
        }
        HistoryAction::Clear { yes } => {
            let confirmed = yes || confirm("Clear all translation history?")?;
            if controller.clear_history(confirmed).await? {
                println!("Translation history cleared");
            }
        }
    }
    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
