use super::{AuditError, AuditProvider, AuditReport, DataSource, RawIssue};
use crate::site::SiteUrl;
use std::fmt;

/// Why a run is using sample data instead of a live audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoReason {
    MissingCredentials,
    MissingEndpoint,
    Requested,
}

impl fmt::Display for DemoReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DemoReason::MissingCredentials => "no audit credentials configured",
            DemoReason::MissingEndpoint => {
                "no audit endpoint configured (set audit.endpoint or --endpoint)"
            }
            DemoReason::Requested => "demo mode requested",
        })
    }
}

/// Deterministic sample findings used when no live audit is available.
///
/// 47 pages, 18 issues (3 critical, 8 important, 7 medium), 12.3 estimated
/// fix hours. The same data is returned for every site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoAuditProvider {
    pub reason: DemoReason,
}

impl DemoAuditProvider {
    pub fn new(reason: DemoReason) -> Self {
        Self { reason }
    }
}

pub fn demo_report() -> AuditReport {
    AuditReport {
        pages_analyzed: 47,
        issues: vec![
            RawIssue::new("broken_links", 2, "Internal links returning 404"),
            RawIssue::new("missing_title", 1, "Page without a <title> element"),
            RawIssue::new("missing_meta_description", 5, "Pages without a meta description"),
            RawIssue::new("slow_page", 3, "Pages loading in more than 3 seconds"),
            RawIssue::new("missing_alt_text", 4, "Pages with images missing alt attributes"),
            RawIssue::new("thin_content", 3, "Pages with fewer than 300 words"),
        ],
    }
}

impl AuditProvider for DemoAuditProvider {
    fn source(&self) -> DataSource {
        DataSource::Demo
    }

    fn demo_reason(&self) -> Option<DemoReason> {
        Some(self.reason)
    }

    fn fetch(&self, site: &SiteUrl) -> Result<AuditReport, AuditError> {
        tracing::debug!(site = %site, "generating demo audit data");
        Ok(demo_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify_all, AuditSummary};
    use crate::tier::{recommend_tier, Tier};

    #[test]
    fn demo_dataset_matches_documented_figures() {
        let report = demo_report();
        let classified = classify_all(&report.issues);
        let summary = AuditSummary::from_classified(report.pages_analyzed, &classified);
        assert_eq!(summary.pages_analyzed, 47);
        assert_eq!(summary.total_issues, 18);
        assert_eq!(summary.critical_issues, 3);
        assert_eq!(summary.important_issues, 8);
        assert_eq!(summary.estimated_fix_hours, 12.3);
        assert_eq!(recommend_tier(&classified), Tier::Business);
    }

    #[test]
    fn demo_data_is_identical_across_sites() {
        let a = DemoAuditProvider::new(DemoReason::Requested)
            .fetch(&SiteUrl::parse("a.example").unwrap())
            .unwrap();
        let b = DemoAuditProvider::new(DemoReason::MissingCredentials)
            .fetch(&SiteUrl::parse("b.example").unwrap())
            .unwrap();
        assert_eq!(a, b);
    }
}
