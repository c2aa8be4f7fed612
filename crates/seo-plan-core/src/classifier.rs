//! Issue classification: raw audit findings → category, severity, hours.
//!
//! Severity and hour costs are policy, not derived logic, so they live in the
//! single [`RULES`] table below. Anything the table does not recognise falls
//! back to [`FALLBACK_CATEGORY`] / [`FALLBACK_SEVERITY`] at
//! [`FALLBACK_HOURS_PER_UNIT`], so classification never fails.

use crate::audit::RawIssue;
use crate::types::{Category, Severity};
use serde::{Deserialize, Serialize};

pub const FALLBACK_CATEGORY: Category = Category::Other;
pub const FALLBACK_SEVERITY: Severity = Severity::Medium;
pub const FALLBACK_HOURS_PER_UNIT: f64 = 0.5;

// ---------------------------------------------------------------------------
// IssueRule
// ---------------------------------------------------------------------------

/// One row of the classification policy.
///
/// `title` is a task title template. `{pages}` expands to a count-aware
/// phrase ("1 page", "12 pages"); templates without it are binary site-wide
/// issues whose title does not depend on the affected count.
#[derive(Debug)]
pub struct IssueRule {
    pub kind: &'static str,
    pub aliases: &'static [&'static str],
    pub category: Category,
    pub severity: Severity,
    pub per_unit_hours: f64,
    pub label: &'static str,
    pub title: &'static str,
}

macro_rules! issue_rule {
    ($kind:expr, [$($alias:expr),* $(,)?], $cat:ident, $sev:ident, $hours:expr, $label:expr, $title:expr) => {
        IssueRule {
            kind: $kind,
            aliases: &[$($alias),*],
            category: Category::$cat,
            severity: Severity::$sev,
            per_unit_hours: $hours,
            label: $label,
            title: $title,
        }
    };
}

pub const RULES: &[IssueRule] = &[
    // critical
    issue_rule!("no_https", ["http_only", "https_missing", "insecure_protocol"],
        Technical, Critical, 2.0, "HTTPS migration", "Migrate the site to HTTPS and redirect all HTTP URLs"),
    issue_rule!("broken_links", ["broken_link", "404_links", "broken_internal_links"],
        Technical, Critical, 0.3, "broken links", "Fix broken links on {pages}"),
    issue_rule!("server_errors", ["server_error", "5xx_errors"],
        Technical, Critical, 1.0, "server errors", "Resolve server errors on {pages}"),
    issue_rule!("not_mobile_friendly", ["mobile_unfriendly", "no_viewport"],
        Performance, Critical, 3.0, "mobile usability", "Make {pages} mobile-friendly"),
    issue_rule!("missing_title", ["missing_titles", "missing_title_tags", "no_title"],
        OnPage, Critical, 0.5, "title tags", "Add unique, optimized title tags to {pages}"),
    issue_rule!("missing_google_business_profile", ["missing_gbp", "no_gbp"],
        LocalSeo, Critical, 2.0, "Google Business Profile", "Claim and optimize the Google Business Profile"),
    // important
    issue_rule!("duplicate_title", ["duplicate_titles", "duplicate_title_tags"],
        OnPage, Important, 0.4, "duplicate titles", "Rewrite duplicate title tags on {pages}"),
    issue_rule!("missing_meta_description", ["missing_meta_descriptions", "no_meta_description"],
        OnPage, Important, 0.4, "meta descriptions", "Write compelling meta descriptions for {pages}"),
    issue_rule!("duplicate_meta_description", ["duplicate_meta_descriptions"],
        OnPage, Important, 0.3, "duplicate meta descriptions", "Rewrite duplicate meta descriptions on {pages}"),
    issue_rule!("missing_h1", ["no_h1", "missing_h1_tag"],
        OnPage, Important, 0.3, "H1 headings", "Add descriptive H1 headings to {pages}"),
    issue_rule!("slow_page", ["slow_pages", "slow_load_time", "high_load_time"],
        Performance, Important, 1.5, "page speed", "Improve load speed on {pages}"),
    issue_rule!("missing_sitemap", ["no_sitemap"],
        Technical, Important, 1.0, "XML sitemap", "Create and submit an XML sitemap"),
    issue_rule!("redirect_chains", ["redirect_chain", "redirect_loops"],
        Technical, Important, 0.5, "redirect chains", "Collapse redirect chains affecting {pages}"),
    issue_rule!("duplicate_content", [],
        Content, Important, 1.5, "duplicate content", "Consolidate duplicate content across {pages}"),
    issue_rule!("nap_inconsistency", ["inconsistent_nap"],
        LocalSeo, Important, 0.75, "NAP consistency", "Align business name, address and phone across {pages}"),
    // medium
    issue_rule!("missing_alt_text", ["missing_alt", "images_without_alt", "no_image_alt"],
        OnPage, Medium, 0.2, "image alt text", "Add descriptive alt text to images on {pages}"),
    issue_rule!("large_images", ["uncompressed_images", "large_image_size"],
        Performance, Medium, 0.25, "image compression", "Compress oversized images on {pages}"),
    issue_rule!("missing_canonical", ["canonical_missing", "no_canonical"],
        Technical, Medium, 0.3, "canonical tags", "Add canonical tags to {pages}"),
    issue_rule!("missing_robots_txt", ["no_robots_txt"],
        Technical, Medium, 0.5, "robots.txt", "Add a robots.txt file with crawl directives"),
    issue_rule!("missing_structured_data", ["missing_schema", "no_schema_markup"],
        LocalSeo, Medium, 1.0, "structured data", "Add LocalBusiness structured data to {pages}"),
    issue_rule!("thin_content", ["low_word_count", "low_content_rate"],
        Content, Medium, 1.3, "thin content", "Expand thin content on {pages}"),
];

impl IssueRule {
    pub fn is_binary(&self) -> bool {
        !self.title.contains("{pages}")
    }

    pub fn render_title(&self, affected: u32) -> String {
        self.title.replace("{pages}", &pages(affected))
    }
}

/// Look up the policy row for a (normalized) issue type.
pub fn rule_for(kind: &str) -> Option<&'static IssueRule> {
    RULES
        .iter()
        .find(|r| r.kind == kind || r.aliases.contains(&kind))
}

/// Lowercase, trim, and fold `-` and whitespace into `_`.
pub fn normalize_kind(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// "1 page", "12 pages".
pub fn pages(n: u32) -> String {
    if n == 1 {
        "1 page".to_string()
    } else {
        format!("{n} pages")
    }
}

/// Round to hundredths to keep float noise out of summed estimates.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// ClassifiedIssue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedIssue {
    pub kind: String,
    pub category: Category,
    pub severity: Severity,
    pub estimated_hours: f64,
    pub affected_count: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl ClassifiedIssue {
    /// Issues reported with no affected count still represent one finding.
    pub fn units(&self) -> u32 {
        self.affected_count.max(1)
    }
}

pub fn classify(raw: &RawIssue) -> ClassifiedIssue {
    let kind = normalize_kind(&raw.issue_type);
    let units = f64::from(raw.affected_count.max(1));

    let (kind, category, severity, per_unit) = match rule_for(&kind) {
        Some(rule) => (
            rule.kind.to_string(),
            rule.category,
            rule.severity,
            rule.per_unit_hours,
        ),
        None => {
            tracing::debug!(kind = %kind, "unrecognised issue type, using fallback classification");
            (kind, FALLBACK_CATEGORY, FALLBACK_SEVERITY, FALLBACK_HOURS_PER_UNIT)
        }
    };

    ClassifiedIssue {
        kind,
        category,
        severity,
        estimated_hours: round_hours(per_unit * units),
        affected_count: raw.affected_count,
        description: raw.description.clone(),
    }
}

pub fn classify_all(raw: &[RawIssue]) -> Vec<ClassifiedIssue> {
    raw.iter().map(classify).collect()
}

// ---------------------------------------------------------------------------
// AuditSummary
// ---------------------------------------------------------------------------

/// Headline counts shown in the console summary and stored on the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub pages_analyzed: u32,
    pub total_issues: u32,
    pub critical_issues: u32,
    pub important_issues: u32,
    pub medium_issues: u32,
    pub estimated_fix_hours: f64,
}

impl AuditSummary {
    pub fn from_classified(pages_analyzed: u32, issues: &[ClassifiedIssue]) -> Self {
        let count = |sev: Severity| -> u32 {
            issues
                .iter()
                .filter(|i| i.severity == sev)
                .fold(0u32, |acc, i| acc.saturating_add(i.units()))
        };
        let critical_issues = count(Severity::Critical);
        let important_issues = count(Severity::Important);
        let medium_issues = count(Severity::Medium);
        let hours: f64 = issues.iter().map(|i| i.estimated_hours).sum();
        Self {
            pages_analyzed,
            total_issues: critical_issues
                .saturating_add(important_issues)
                .saturating_add(medium_issues),
            critical_issues,
            important_issues,
            medium_issues,
            estimated_fix_hours: (hours * 10.0).round() / 10.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
