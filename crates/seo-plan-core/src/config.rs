use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Looked up in the working directory when no explicit config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "seo-plan.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// AuditConfig
// ---------------------------------------------------------------------------

/// Live audit API settings. Without an endpoint every run uses demo data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AuditConfig {
    /// The configured endpoint, if it is set and not blank.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Task-tracker folder; `{domain}` is replaced with the client domain.
    #[serde(default = "default_folder")]
    pub folder: String,
    #[serde(default = "default_space")]
    pub space: String,
    /// Critical tasks touching more pages than this are split into subtasks.
    #[serde(default = "default_subtask_threshold")]
    pub subtask_threshold: u32,
}

fn default_folder() -> String {
    "{domain} SEO".to_string()
}

fn default_space() -> String {
    "Client Projects".to_string()
}

fn default_subtask_threshold() -> u32 {
    5
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            space: default_space(),
            subtask_threshold: default_subtask_threshold(),
        }
    }
}

impl ExportConfig {
    pub fn folder_for(&self, domain: &str) -> String {
        self.folder.replace("{domain}", domain)
    }
}

// ---------------------------------------------------------------------------
// PlanConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    /// Fixed engagement start; today when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// PlannerConfig (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub plan: PlanConfig,
}

impl PlannerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let cfg: PlannerConfig = serde_yaml::from_str(&data)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Load an explicit config file, or `seo-plan.yaml` from `dir` if present,
    /// or fall back to defaults. An explicit path that does not exist is an
    /// error; a missing default file is not.
    pub fn resolve(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::load(&default_path);
        }
        Ok(Self::default())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        match self.audit.endpoint.as_deref().map(str::trim) {
            None => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "audit.endpoint is not set; live audits are disabled and plans use demo data"
                    .to_string(),
            }),
            Some("") => warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "audit.endpoint is empty".to_string(),
            }),
            Some(endpoint) if !endpoint.starts_with("https://") && !endpoint.starts_with("http://") => {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("audit.endpoint '{endpoint}' is not an http(s) url"),
                })
            }
            Some(endpoint) if endpoint.starts_with("http://") => warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "audit.endpoint uses plain http; credentials will be sent unencrypted"
                    .to_string(),
            }),
            Some(_) => {}
        }

        if self.audit.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "audit.timeout_secs must be greater than zero".to_string(),
            });
        } else if self.audit.timeout_secs > 300 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "audit.timeout_secs={} (>300 is unusual)",
                    self.audit.timeout_secs
                ),
            });
        }

        if self.export.subtask_threshold == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "export.subtask_threshold=0 splits every critical task into subtasks"
                    .to_string(),
            });
        }

        if self.export.space.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "export.space is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
