use serde::{Deserialize, Serialize};
use std::fmt;

/// Reachability of the translation service. Recomputed on every check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceHealth {
    Online,
    Offline,
    /// The check itself could not be completed (e.g. the proxy is down)
    Unavailable,
}

impl ServiceHealth {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Service Online",
            Self::Offline => "Service Offline",
            Self::Unavailable => "Service Unavailable",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }
}

impl fmt::Display for ServiceHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: ServiceHealth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthReport {
    pub fn online(message: Option<String>) -> Self {
        Self {
            status: ServiceHealth::Online,
            message,
        }
    }

    pub fn offline(message: impl Into<String>) -> Self {
        Self {
            status: ServiceHealth::Offline,
            message: Some(message.into()),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            status: ServiceHealth::Unavailable,
            message: Some(message.into()),
        }
    }
}

/// Optional body of the remote health endpoint
#[derive(Debug, Default, Deserialize)]
pub(crate) struct HealthBody {
    #[serde(default)]
    pub status: Option<String>,
}

/// Envelope returned by the proxy's health route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyHealth {
    pub success: bool,
    pub status: ServiceHealth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<HealthReport> for ProxyHealth {
    fn from(report: HealthReport) -> Self {
        match report.status {
            ServiceHealth::Online => Self {
                success: true,
                status: ServiceHealth::Online,
                message: Some(
                    report
                        .message
                        .unwrap_or_else(|| "Service is running".to_string()),
                ),
            },
            _ => Self {
                success: false,
                status: ServiceHealth::Offline,
                message: Some("Service is unavailable".to_string()),
            },
        }
    }
}

impl From<ProxyHealth> for HealthReport {
    fn from(envelope: ProxyHealth) -> Self {
        if envelope.success && envelope.status.is_online() {
            Self::online(envelope.message)
        } else {
            Self {
                status: ServiceHealth::Offline,
                message: envelope.message,
            }
        }
    }
}
