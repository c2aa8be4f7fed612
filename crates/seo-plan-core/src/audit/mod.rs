//! Audit data providers.
//!
//! The planner only ever sees an [`AuditReport`]. Where it came from is
//! decided once, in [`select_provider`]: a live audit API when credentials
//! and an endpoint are configured, otherwise the deterministic demo dataset
//! along with the [`DemoReason`]. [`run_audit`]
//! downgrades any live failure to demo data so a plan is always produced.

pub mod demo;
pub mod remote;

pub use demo::{DemoAuditProvider, DemoReason};
pub use remote::RemoteAuditProvider;

use crate::config::AuditConfig;
use crate::site::SiteUrl;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawIssue {
    #[serde(rename = "type")]
    pub issue_type: String,
    #[serde(default)]
    pub affected_count: u32,
    #[serde(default)]
    pub description: String,
}

impl RawIssue {
    pub fn new(issue_type: impl Into<String>, affected_count: u32, description: impl Into<String>) -> Self {
        Self {
            issue_type: issue_type.into(),
            affected_count,
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    #[serde(default)]
    pub pages_analyzed: u32,
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Demo,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DataSource::Live => "live",
            DataSource::Demo => "demo",
        })
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

impl Credentials {
    /// Both halves must be present and non-blank.
    pub fn from_parts(login: Option<String>, password: Option<String>) -> Option<Self> {
        match (login, password) {
            (Some(login), Some(password)) if !login.trim().is_empty() && !password.is_empty() => {
                Some(Self { login, password })
            }
            _ => None,
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("audit server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("audit response could not be decoded: {0}")]
    Decode(String),
}

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

pub trait AuditProvider {
    fn source(&self) -> DataSource;

    /// Set by providers that serve sample data; announced as a warning.
    fn demo_reason(&self) -> Option<DemoReason> {
        None
    }

    fn fetch(&self, site: &SiteUrl) -> Result<AuditReport, AuditError>;
}

/// Remote provider when both credentials and an endpoint are configured,
/// demo provider otherwise.
pub fn select_provider(
    credentials: Option<Credentials>,
    config: &AuditConfig,
) -> Result<Box<dyn AuditProvider>, AuditError> {
    match (credentials, config.endpoint()) {
        (None, _) => Ok(Box::new(DemoAuditProvider::new(DemoReason::MissingCredentials))),
        (Some(_), None) => Ok(Box::new(DemoAuditProvider::new(DemoReason::MissingEndpoint))),
        (Some(credentials), Some(endpoint)) => Ok(Box::new(RemoteAuditProvider::new(
            endpoint,
            config.timeout_secs,
            credentials,
        )?)),
    }
}

#[derive(Debug, Clone)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub source: DataSource,
    pub warnings: Vec<String>,
}

/// Fetch findings, substituting demo data on any provider failure.
pub fn run_audit(provider: &dyn AuditProvider, site: &SiteUrl) -> AuditOutcome {
    let mut warnings = Vec::new();
    if let Some(reason) = provider.demo_reason() {
        let message = format!("{reason}: running in demo mode with sample audit data");
        tracing::warn!("{message}");
        warnings.push(message);
    }

    match provider.fetch(site) {
        Ok(report) => {
            tracing::info!(
                site = %site,
                source = %provider.source(),
                pages = report.pages_analyzed,
                issues = report.issues.len(),
                "audit complete"
            );
            AuditOutcome {
                report,
                source: provider.source(),
                warnings,
            }
        }
        Err(e) => {
            let message = format!("live audit unavailable ({e}): falling back to demo mode with sample audit data");
            tracing::warn!(site = %site, error = %e, "audit failed, using demo data");
            warnings.push(message);
            AuditOutcome {
                report: demo::demo_report(),
                source: DataSource::Demo,
                warnings,
            }
        }
    }
}

/// Fallback used when the live provider cannot even be constructed.
pub fn demo_outcome(reason: &str) -> AuditOutcome {
    tracing::warn!(reason, "using demo data");
    AuditOutcome {
        report: demo::demo_report(),
        source: DataSource::Demo,
        warnings: vec![format!(
            "{reason}: falling back to demo mode with sample audit data"
        )],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    impl AuditProvider for FailingProvider {
        fn source(&self) -> DataSource {
            DataSource::Live
        }

        fn fetch(&self, _site: &SiteUrl) -> Result<AuditReport, AuditError> {
            Err(AuditError::Server {
                status: 401,
                body: "bad credentials".to_string(),
            })
        }
    }

    struct FixedProvider(AuditReport);

    impl AuditProvider for FixedProvider {
        fn source(&self) -> DataSource {
            DataSource::Live
        }

        fn fetch(&self, _site: &SiteUrl) -> Result<AuditReport, AuditError> {
            Ok(self.0.clone())
        }
    }

    fn site() -> SiteUrl {
        SiteUrl::parse("example.com").unwrap()
    }

    #[test]
    fn raw_issue_json_uses_type_field() {
        let issue: RawIssue =
            serde_json::from_str(r#"{"type":"missing_title","affected_count":3}"#).unwrap();
        assert_eq!(issue.issue_type, "missing_title");
        assert_eq!(issue.affected_count, 3);
        assert!(issue.description.is_empty());
    }

    #[test]
    fn failure_falls_back_to_demo_with_warning() {
        let outcome = run_audit(&FailingProvider, &site());
        assert_eq!(outcome.source, DataSource::Demo);
        assert_eq!(outcome.report, demo::demo_report());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("demo mode"));
        assert!(outcome.warnings[0].contains("401"));
    }

    #[test]
    fn live_success_has_no_warnings() {
        let report = AuditReport {
            pages_analyzed: 3,
            issues: vec![RawIssue::new("missing_h1", 1, "")],
        };
        let outcome = run_audit(&FixedProvider(report.clone()), &site());
        assert_eq!(outcome.source, DataSource::Live);
        assert_eq!(outcome.report, report);
        assert!(outcome.warnings.is_empty());
    }

    fn credentials() -> Option<Credentials> {
        Credentials::from_parts(Some("agency".into()), Some("secret".into()))
    }

    #[test]
    fn demo_provider_announces_demo_mode() {
        let outcome = run_audit(&DemoAuditProvider::new(DemoReason::MissingCredentials), &site());
        assert_eq!(outcome.source, DataSource::Demo);
        assert_eq!(
            outcome.warnings,
            vec!["no audit credentials configured: running in demo mode with sample audit data"]
        );
    }

    #[test]
    fn requested_demo_mode_does_not_blame_credentials() {
        let outcome = run_audit(&DemoAuditProvider::new(DemoReason::Requested), &site());
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].starts_with("demo mode requested"));
        assert!(!outcome.warnings[0].contains("credentials"));
    }

    #[test]
    fn select_provider_without_credentials_is_demo() {
        let provider = select_provider(None, &AuditConfig::default()).unwrap();
        assert_eq!(provider.source(), DataSource::Demo);
        assert_eq!(provider.demo_reason(), Some(DemoReason::MissingCredentials));
    }

    #[test]
    fn select_provider_without_endpoint_is_demo() {
        let provider = select_provider(credentials(), &AuditConfig::default()).unwrap();
        assert_eq!(provider.demo_reason(), Some(DemoReason::MissingEndpoint));
        let outcome = run_audit(provider.as_ref(), &site());
        assert!(outcome.warnings[0].contains("no audit endpoint configured"));
    }

    #[test]
    fn select_provider_with_endpoint_is_live() {
        let config = AuditConfig {
            endpoint: Some("https://audit.example/v1/site".to_string()),
            timeout_secs: 5,
        };
        let provider = select_provider(credentials(), &config).unwrap();
        assert_eq!(provider.source(), DataSource::Live);
        assert_eq!(provider.demo_reason(), None);
    }

    #[test]
    fn credentials_require_both_parts() {
        assert!(Credentials::from_parts(Some("a".into()), None).is_none());
        assert!(Credentials::from_parts(Some(" ".into()), Some("p".into())).is_none());
        let c = Credentials::from_parts(Some("a".into()), Some("p".into())).unwrap();
        assert!(!format!("{c:?}").contains("\"p\""));
    }
}
