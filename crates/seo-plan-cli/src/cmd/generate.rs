use crate::cmd::{fetch_audit, load_config, print_warnings, SourceArgs};
use crate::output::{hours, print_heading, print_json, print_table};
use anyhow::Context;
use chrono::NaiveDate;
use clap::Args;
use seo_plan_core::audit::DataSource;
use seo_plan_core::config::ExportConfig;
use seo_plan_core::export;
use seo_plan_core::plan::{build_plan, Plan, PlanRequest};
use seo_plan_core::profile::BusinessProfile;
use seo_plan_core::site::SiteUrl;
use seo_plan_core::tier::Tier;
use seo_plan_core::PlanError;
use std::path::{Path, PathBuf};

/// Immediate tasks shown in the console summary.
const TOP_TASKS: usize = 5;

#[derive(Args)]
pub struct GenerateArgs {
    /// Website URL (scheme optional, https assumed)
    pub url: String,

    /// Force a tier: starter, business, or pro
    #[arg(long)]
    pub tier: Option<String>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// JSON plan path (default: {domain}_seo_plan_{YYYYMMDD}.json)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Also write the task-tracker CSV
    #[arg(long)]
    pub csv: bool,

    /// CSV path (implies --csv)
    #[arg(long)]
    pub csv_output: Option<PathBuf>,

    /// First day of the engagement, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Client size: small_local, growing, established
    #[arg(long)]
    pub business_size: Option<String>,

    /// Market competition: low, medium, high
    #[arg(long)]
    pub competition: Option<String>,

    /// Monthly budget: under_1000, 1000_1500, over_1500
    #[arg(long)]
    pub budget: Option<String>,

    /// Growth goals: foundation, growth, aggressive_growth
    #[arg(long)]
    pub goals: Option<String>,
}

impl GenerateArgs {
    fn profile(&self) -> seo_plan_core::Result<BusinessProfile> {
        Ok(BusinessProfile {
            business_size: self.business_size.as_deref().map(str::parse).transpose()?,
            competition: self.competition.as_deref().map(str::parse).transpose()?,
            budget: self.budget.as_deref().map(str::parse).transpose()?,
            goals: self.goals.as_deref().map(str::parse).transpose()?,
        })
    }
}

pub fn parse_start_date(input: &str) -> seo_plan_core::Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidStartDate(input.to_string()))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config_path: Option<&Path>, args: GenerateArgs, json: bool) -> anyhow::Result<()> {
    // Input errors are fatal before any network or file access.
    let site = SiteUrl::parse(&args.url)?;
    let requested_tier = args.tier.as_deref().map(str::parse::<Tier>).transpose()?;
    let profile = args.profile()?;
    let explicit_start = args.start_date.as_deref().map(parse_start_date).transpose()?;

    let config = load_config(config_path)?;
    let today = chrono::Local::now().date_naive();
    let start_date = explicit_start
        .or(config.plan.start_date)
        .unwrap_or(today);

    let outcome = fetch_audit(&config, args.source, &site);
    print_warnings(&outcome.warnings);

    let plan = build_plan(
        &PlanRequest {
            site: &site,
            requested_tier,
            profile: &profile,
            start_date,
        },
        &outcome,
    );
    print_warnings(&plan.advisories);

    if json {
        print_json(&plan)?;
    } else {
        print_summary(&plan);
    }

    let json_path = args
        .output
        .unwrap_or_else(|| export::default_json_path(&plan.domain, today));
    let csv_path = match (args.csv_output, args.csv) {
        (Some(p), _) => Some(p),
        (None, true) => Some(export::default_csv_path(&plan.domain, today)),
        (None, false) => None,
    };

    write_exports(&plan, &config.export, &json_path, csv_path.as_deref(), json)
}

// ---------------------------------------------------------------------------
// Exports
// ---------------------------------------------------------------------------

fn write_exports(
    plan: &Plan,
    export_config: &ExportConfig,
    json_path: &Path,
    csv_path: Option<&Path>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut failures = 0;

    match export::json::write_plan(plan, json_path)
        .with_context(|| format!("failed to write plan to {}", json_path.display()))
    {
        Ok(()) if !quiet => println!("Plan written to {}", json_path.display()),
        Ok(()) => {}
        Err(e) => {
            eprintln!("error: {e:#}");
            failures += 1;
        }
    }

    if let Some(path) = csv_path {
        match export::csv::write_csv(plan, export_config, path)
            .with_context(|| format!("failed to write task csv to {}", path.display()))
        {
            Ok(()) if !quiet => println!("Task CSV written to {}", path.display()),
            Ok(()) => {}
            Err(e) => {
                eprintln!("error: {e:#}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} export(s) failed");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Console summary
// ---------------------------------------------------------------------------

fn print_summary(plan: &Plan) {
    let source = match plan.data_source {
        DataSource::Live => "live audit",
        DataSource::Demo => "demo data",
    };
    println!("SEO plan for {} ({source})", plan.client);

    print_heading("Audit");
    let a = &plan.audit;
    println!("Pages analyzed:   {}", a.pages_analyzed);
    println!(
        "Issues:           {} ({} critical, {} important, {} medium)",
        a.total_issues, a.critical_issues, a.important_issues, a.medium_issues
    );
    println!("Estimated fixes:  {}", hours(a.estimated_fix_hours));

    print_heading("Service tier");
    println!("Recommended:      {}", plan.recommended_tier);
    println!("Chosen:           {}", plan.tier);
    println!("Investment:       {}", plan.investment);
    println!(
        "Monthly hours:    {} base, {} in month one",
        hours(plan.base_hours),
        hours(plan.actual_hours)
    );

    print_heading("Immediate tasks");
    if plan.immediate_tasks.is_empty() {
        println!("No remediation work found.");
    } else {
        let rows: Vec<Vec<String>> = plan
            .immediate_tasks
            .iter()
            .take(TOP_TASKS)
            .map(|t| {
                vec![
                    t.priority.to_string(),
                    t.category.to_string(),
                    hours(t.hours),
                    t.title.clone(),
                ]
            })
            .collect();
        print_table(&["PRIORITY", "CATEGORY", "HOURS", "TASK"], rows);
        if plan.immediate_tasks.len() > TOP_TASKS {
            println!("... and {} more", plan.immediate_tasks.len() - TOP_TASKS);
        }
    }

    if !plan.strategic_tasks.is_empty() {
        print_heading("Strategic initiatives");
        for t in &plan.strategic_tasks {
            println!("  month {:>2}  {}", t.phase.start_month(), t.title);
        }
    }

    print_heading("Recurring work");
    let rows: Vec<Vec<String>> = plan
        .recurring_tasks
        .iter()
        .map(|t| vec![t.frequency.to_string(), hours(t.hours), t.title.clone()])
        .collect();
    print_table(&["FREQUENCY", "HOURS", "TASK"], rows);
    println!(
        "Recurring hours in month 12: {}",
        hours(plan.recurring_hours_in(12))
    );

    if !plan.advisories.is_empty() {
        print_heading("Advisories");
        for a in &plan.advisories {
            println!("  - {a}");
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_date_requires_iso_format() {
        assert_eq!(
            parse_start_date("2026-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
        );
        assert!(parse_start_date("03/01/2026").is_err());
        assert!(parse_start_date("2026-02-30").is_err());
    }

    #[test]
    fn profile_flags_are_validated() {
        let mut args = GenerateArgs {
            url: "example.com".into(),
            tier: None,
            source: SourceArgs {
                demo: true,
                ..Default::default()
            },
            output: None,
            csv: false,
            csv_output: None,
            start_date: None,
            business_size: Some("growing".into()),
            competition: None,
            budget: Some("over_1500".into()),
            goals: None,
        };
        let profile = args.profile().unwrap();
        assert!(profile.business_size.is_some());
        assert!(profile.budget.is_some());

        args.goals = Some("world_domination".into());
        assert!(args.profile().is_err());
    }
}
