use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::Result;
use regex::Regex;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub service_config: ServiceConfig,
    #[serde(default)]
    pub history_config: HistoryConfig,
}

/// Settings for the proxy server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory with the web client assets, served at `/` when set
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Talk to the translation service with the shared credential
    Direct,
    /// Go through the proxy server, which holds the credential
    Proxied,
}

/// Where and how to reach the remote translation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_transport")]
    pub transport: TransportMode,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_transport() -> TransportMode {
    TransportMode::Direct
}

fn default_base_url() -> String {
    "http://localhost:8080/translator/api".to_string()
}

fn default_proxy_url() -> String {
    "http://localhost:8090".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_storage_path() -> String {
    "translator_storage.json".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            base_url: default_base_url(),
            proxy_url: default_proxy_url(),
            username: String::new(),
            password: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn translate_endpoint(&self) -> String {
        format!("{}/translator/translate", self.base_url.trim_end_matches('/'))
    }

    pub fn health_endpoint(&self) -> String {
        format!("{}/translator/health", self.base_url.trim_end_matches('/'))
    }
}

impl HistoryConfig {
    pub fn storage_path(&self) -> PathBuf {
        PathBuf::from(&self.storage_path)
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("Configuration file not found: {}", path);
        }

        let content = substitute_env_vars(&read_text_file(path)?);

        let path_lower = path.to_lowercase();
        if path_lower.ends_with(".jsonld") || path_lower.ends_with(".json") {
            let mut json_value: serde_json::Value = serde_json::from_str(&content)?;
            if let serde_json::Value::Object(ref mut obj) = json_value {
                obj.remove("@context");
            }
            Ok(serde_json::from_value(json_value)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }

    /// Try each candidate in order and return the first that loads, along
    /// with the path it came from. Falls back to defaults when none exist.
    pub fn discover(explicit: Option<&str>) -> Result<(Self, Option<String>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_string())));
        }

        let candidates: Vec<String> = vec![
            std::env::var("CONFIG_PATH").ok(),
            Some("conf.yaml".to_string()),
            Some("conf.jsonld".to_string()),
            Some("conf.json".to_string()),
        ]
        .into_iter()
        .flatten()
        .collect();

        for path in candidates {
            if !Path::new(&path).exists() {
                continue;
            }
            match Self::load(&path) {
                Ok(cfg) => return Ok((cfg, Some(path))),
                Err(e) => {
                    tracing::debug!("Failed to load config from {}: {}", path, e);
                    return Err(e);
                }
            }
        }

        Ok((Self::default(), None))
    }
}

/// Read a config file, dropping a UTF-8 BOM and replacing invalid sequences
fn read_text_file(path: &str) -> Result<String> {
    let bytes = fs::read(path)?;
    let (cow, _) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
    Ok(cow.into_owned())
}

/// Replace `${VAR_NAME}` with the environment value, leaving unknown
/// variables untouched
fn substitute_env_vars(content: &str) -> String {
    let pattern = match Regex::new(r"\$\{(\w+)\}") {
        Ok(p) => p,
        Err(_) => return content.to_string(),
    };
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}
