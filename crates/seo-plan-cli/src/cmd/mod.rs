pub mod audit;
pub mod config;
pub mod generate;
pub mod tiers;

use anyhow::Context;
use clap::Args;
use seo_plan_core::audit::{
    demo_outcome, run_audit, select_provider, AuditOutcome, AuditProvider, Credentials,
    DemoAuditProvider, DemoReason,
};
use seo_plan_core::config::PlannerConfig;
use seo_plan_core::site::SiteUrl;
use std::path::Path;

/// Where audit data comes from. Shared by every command that runs an audit.
#[derive(Args, Default)]
pub struct SourceArgs {
    /// Audit API login
    #[arg(long, env = "SEO_AUDIT_LOGIN", hide_env_values = true)]
    pub login: Option<String>,

    /// Audit API password
    #[arg(long, env = "SEO_AUDIT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Audit API endpoint (overrides audit.endpoint)
    #[arg(long, env = "SEO_AUDIT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Audit request timeout in seconds (overrides audit.timeout_secs)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Use the sample dataset even when credentials are set
    #[arg(long)]
    pub demo: bool,
}

/// Explicit `--config`, else `./seo-plan.yaml`, else defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<PlannerConfig> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    PlannerConfig::resolve(explicit, &cwd).context("failed to load config")
}

/// Run the audit for `site`. Never fails: any provider problem becomes a
/// demo-mode outcome carrying a warning.
pub fn fetch_audit(config: &PlannerConfig, source: SourceArgs, site: &SiteUrl) -> AuditOutcome {
    let mut audit_config = config.audit.clone();
    if let Some(endpoint) = source.endpoint {
        audit_config.endpoint = Some(endpoint);
    }
    if let Some(timeout) = source.timeout {
        audit_config.timeout_secs = timeout;
    }

    tracing::debug!(
        demo = source.demo,
        endpoint = audit_config.endpoint().unwrap_or("-"),
        "selecting audit source"
    );
    let provider: Box<dyn AuditProvider> = if source.demo {
        Box::new(DemoAuditProvider::new(DemoReason::Requested))
    } else {
        let credentials = Credentials::from_parts(source.login, source.password);
        match select_provider(credentials, &audit_config) {
            Ok(provider) => provider,
            Err(e) => return demo_outcome(&format!("audit client could not be created ({e})")),
        }
    };
    run_audit(provider.as_ref(), site)
}

pub fn print_warnings(warnings: &[String]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}
