use crate::audit::{AuditOutcome, DataSource};
use crate::classifier::{classify_all, AuditSummary};
use crate::profile::BusinessProfile;
use crate::schedule::{expand, recurring_tasks, strategic_tasks, PLAN_MONTHS};
use crate::site::SiteUrl;
use crate::task::{synthesize, Task};
use crate::tier::{recommend_tier, select_tier, Tier, TierSelection};
use crate::types::Priority;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// The 12-month plan. Built once per run, then exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub client: String,
    pub domain: String,
    pub tier: Tier,
    pub recommended_tier: Tier,
    pub investment: String,
    pub monthly_price: u32,
    pub base_hours: f64,
    /// Base allocation plus immediate remediation hours.
    pub actual_hours: f64,
    pub start_date: NaiveDate,
    pub data_source: DataSource,
    pub audit: AuditSummary,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
    pub immediate_tasks: Vec<Task>,
    #[serde(default)]
    pub strategic_tasks: Vec<Task>,
    pub recurring_tasks: Vec<Task>,
    /// Plan month (1-12) → scheduled task occurrences, in display order.
    pub monthly_breakdown: BTreeMap<u8, Vec<Task>>,
}

impl Plan {
    /// Every task template: immediate, then strategic, then recurring.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.immediate_tasks
            .iter()
            .chain(&self.strategic_tasks)
            .chain(&self.recurring_tasks)
    }

    pub fn month(&self, month: u8) -> &[Task] {
        self.monthly_breakdown
            .get(&month)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn occurrence_count(&self) -> usize {
        self.monthly_breakdown.values().map(Vec::len).sum()
    }

    pub fn immediate_hours(&self) -> f64 {
        self.immediate_tasks.iter().map(|t| t.hours).sum()
    }

    /// Hours of recurring work scheduled in `month`.
    pub fn recurring_hours_in(&self, month: u8) -> f64 {
        self.month(month)
            .iter()
            .filter(|t| t.frequency.is_recurring())
            .map(|t| t.hours)
            .sum()
    }
}

fn round_tenth(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

pub struct PlanInput<'a> {
    pub site: &'a SiteUrl,
    pub selection: TierSelection,
    pub one_time: Vec<Task>,
    pub recurring: Vec<Task>,
    pub audit: AuditSummary,
    pub data_source: DataSource,
    pub start_date: NaiveDate,
    pub advisories: Vec<String>,
}

/// Lay tasks out over the plan window.
///
/// Remediation tasks go into month 1. Strategic tasks wait for their phase
/// (Measure starts in month 3, Learn in month 4). Recurring tasks appear in
/// every month their frequency selects. Within a month the order is
/// immediate, strategic, recurring.
pub fn assemble(input: PlanInput<'_>) -> Plan {
    let PlanInput {
        site,
        selection,
        one_time,
        recurring,
        audit,
        data_source,
        start_date,
        mut advisories,
    } = input;

    let tier = selection.chosen;
    if let Some(a) = &selection.advisory {
        advisories.insert(0, a.message.clone());
    }

    let (strategic, immediate): (Vec<Task>, Vec<Task>) = one_time
        .into_iter()
        .partition(|t| t.priority == Priority::Strategic);

    let mut breakdown: BTreeMap<u8, Vec<Task>> =
        (1..=PLAN_MONTHS).map(|m| (m, Vec::new())).collect();

    for task in &immediate {
        breakdown.entry(1).or_default().push(task.occurrence(1));
    }
    for task in &strategic {
        let month = task.phase.start_month().clamp(1, PLAN_MONTHS);
        breakdown.entry(month).or_default().push(task.occurrence(month));
    }
    for task in &recurring {
        for occ in expand(task) {
            if let Some(m) = occ.month {
                breakdown.entry(m).or_default().push(occ);
            }
        }
    }

    let base_hours = tier.base_hours();
    let one_time_hours: f64 = immediate.iter().map(|t| t.hours).sum();

    tracing::info!(
        tier = %tier,
        immediate = immediate.len(),
        strategic = strategic.len(),
        recurring = recurring.len(),
        "plan assembled"
    );

    Plan {
        client: site.as_str().to_string(),
        domain: site.domain().to_string(),
        tier,
        recommended_tier: selection.recommended,
        investment: tier.investment(),
        monthly_price: tier.monthly_price(),
        base_hours,
        actual_hours: round_tenth(base_hours + one_time_hours),
        start_date,
        data_source,
        audit,
        advisories,
        immediate_tasks: immediate,
        strategic_tasks: strategic,
        recurring_tasks: recurring,
        monthly_breakdown: breakdown,
    }
}

// ---------------------------------------------------------------------------
// End-to-end derivation
// ---------------------------------------------------------------------------

pub struct PlanRequest<'a> {
    pub site: &'a SiteUrl,
    pub requested_tier: Option<Tier>,
    pub profile: &'a BusinessProfile,
    pub start_date: NaiveDate,
}

/// Classify the audit, choose a tier, synthesize and schedule tasks.
pub fn build_plan(request: &PlanRequest<'_>, outcome: &AuditOutcome) -> Plan {
    let classified = classify_all(&outcome.report.issues);
    let audit = AuditSummary::from_classified(outcome.report.pages_analyzed, &classified);

    let recommended = recommend_tier(&classified);
    let selection = select_tier(recommended, request.requested_tier);
    let tier = selection.chosen;

    let mut one_time = synthesize(&classified);
    one_time.extend(strategic_tasks(tier));

    let advisories: Vec<String> = request.profile.advisory(tier).into_iter().collect();

    assemble(PlanInput {
        site: request.site,
        selection,
        one_time,
        recurring: recurring_tasks(tier),
        audit,
        data_source: outcome.source,
        start_date: request.start_date,
        advisories,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::demo::demo_report;
    use crate::profile::{Budget, BusinessSize};
    use crate::schedule::months_for;
    use crate::types::{Frequency, Phase};

    fn site() -> SiteUrl {
        SiteUrl::parse("https://www.example.com").unwrap()
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn demo_outcome() -> AuditOutcome {
        AuditOutcome {
            report: demo_report(),
            source: DataSource::Demo,
            warnings: vec![],
        }
    }

    fn plan_with(requested: Option<Tier>, profile: &BusinessProfile) -> Plan {
        let site = site();
        build_plan(
            &PlanRequest {
                site: &site,
                requested_tier: requested,
                profile,
                start_date: start(),
            },
            &demo_outcome(),
        )
    }

    #[test]
    fn documented_scenario_yields_business_plan() {
        let plan = plan_with(None, &BusinessProfile::default());
        assert_eq!(plan.recommended_tier, Tier::Business);
        assert_eq!(plan.tier, Tier::Business);
        assert_eq!(plan.investment, "$1,399/month");
        assert_eq!(plan.base_hours, 35.0);
        assert_eq!(plan.audit.total_issues, 18);
        assert_eq!(plan.audit.critical_issues, 3);
        assert_eq!(plan.audit.important_issues, 8);
        assert_eq!(plan.audit.pages_analyzed, 47);
        assert_eq!(plan.audit.estimated_fix_hours, 12.3);
        assert!(plan.advisories.is_empty());
    }

    #[test]
    fn actual_hours_is_base_plus_immediate_work() {
        let plan = plan_with(None, &BusinessProfile::default());
        assert_eq!(plan.actual_hours, 47.3);
        assert_eq!(
            plan.actual_hours,
            round_tenth(plan.base_hours + plan.immediate_hours())
        );
    }

    #[test]
    fn immediate_tasks_land_in_month_one() {
        let plan = plan_with(None, &BusinessProfile::default());
        assert!(!plan.immediate_tasks.is_empty());
        let month_one = plan.month(1);
        for task in &plan.immediate_tasks {
            assert!(month_one
                .iter()
                .any(|t| t.title == task.title && t.frequency == Frequency::Once));
        }
        assert_eq!(&month_one[0].title, &plan.immediate_tasks[0].title);
    }

    #[test]
    fn strategic_tasks_are_deferred_to_their_phase() {
        let plan = plan_with(None, &BusinessProfile::default());
        assert!(!plan.strategic_tasks.is_empty());
        for task in &plan.strategic_tasks {
            let month = task.phase.start_month();
            assert!(month >= 3);
            assert!(plan.month(month).iter().any(|t| t.title == task.title));
            assert!(!plan.month(1).iter().any(|t| t.title == task.title));
        }
        assert!(plan
            .month(Phase::Learn.start_month())
            .iter()
            .any(|t| t.priority == Priority::Strategic));
    }

    #[test]
    fn recurring_tasks_cover_every_selected_month() {
        let plan = plan_with(None, &BusinessProfile::default());
        for task in &plan.recurring_tasks {
            let months = months_for(task.frequency);
            for m in 1..=PLAN_MONTHS {
                let present = plan
                    .month(m)
                    .iter()
                    .any(|t| t.title == task.title && t.month == Some(m));
                assert_eq!(present, months.contains(&m), "{} month {m}", task.title);
            }
        }
    }

    #[test]
    fn breakdown_has_all_twelve_months() {
        let plan = plan_with(Some(Tier::Starter), &BusinessProfile::default());
        assert_eq!(plan.monthly_breakdown.len(), 12);
        assert!(plan.monthly_breakdown.keys().copied().eq(1..=12));
    }

    #[test]
    fn pro_override_uses_pro_pricing_with_advisory() {
        let plan = plan_with(Some(Tier::Pro), &BusinessProfile::default());
        assert_eq!(plan.tier, Tier::Pro);
        assert_eq!(plan.recommended_tier, Tier::Business);
        assert_eq!(plan.monthly_price, 2199);
        assert_eq!(plan.base_hours, 55.0);
        assert_eq!(plan.advisories.len(), 1);
        assert!(plan.advisories[0].contains("over-resourced"));
    }

    #[test]
    fn pro_override_on_clean_site_is_over_resourced() {
        let site = site();
        let outcome = AuditOutcome {
            report: crate::audit::AuditReport {
                pages_analyzed: 5,
                issues: vec![crate::audit::RawIssue::new("missing_alt_text", 2, "")],
            },
            source: DataSource::Live,
            warnings: vec![],
        };
        let plan = build_plan(
            &PlanRequest {
                site: &site,
                requested_tier: Some(Tier::Pro),
                profile: &BusinessProfile::default(),
                start_date: start(),
            },
            &outcome,
        );
        assert_eq!(plan.recommended_tier, Tier::Starter);
        assert_eq!(plan.tier, Tier::Pro);
        assert_eq!(plan.investment, "$2,199/month");
        assert!(plan.advisories[0].contains("over-resourced"));
    }

    #[test]
    fn profile_disagreement_is_advisory_only() {
        let profile = BusinessProfile {
            business_size: Some(BusinessSize::SmallLocal),
            budget: Some(Budget::Under1000),
            ..Default::default()
        };
        let plan = plan_with(None, &profile);
        assert_eq!(plan.tier, Tier::Business);
        assert_eq!(plan.advisories.len(), 1);
        assert!(plan.advisories[0].contains("'starter'"));
    }

    #[test]
    fn json_roundtrip_preserves_headline_fields() {
        let plan = plan_with(None, &BusinessProfile::default());
        let json = serde_json::to_string_pretty(&plan).unwrap();
        let parsed: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tier, plan.tier);
        assert_eq!(parsed.investment, plan.investment);
        assert_eq!(parsed.base_hours, plan.base_hours);
        assert_eq!(parsed.immediate_tasks.len(), plan.immediate_tasks.len());
        assert_eq!(parsed.recurring_tasks.len(), plan.recurring_tasks.len());
        assert_eq!(parsed.occurrence_count(), plan.occurrence_count());
    }

    #[test]
    fn monthly_breakdown_keys_serialize_as_strings() {
        let plan = plan_with(None, &BusinessProfile::default());
        let value = serde_json::to_value(&plan).unwrap();
        let breakdown = value["monthly_breakdown"].as_object().unwrap();
        assert!(breakdown.contains_key("1"));
        assert!(breakdown.contains_key("12"));
    }
}
