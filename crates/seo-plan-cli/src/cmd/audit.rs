use crate::cmd::{fetch_audit, load_config, print_warnings, SourceArgs};
use crate::output::{hours, print_json, print_table};
use seo_plan_core::classifier::{classify_all, AuditSummary};
use seo_plan_core::site::SiteUrl;
use seo_plan_core::tier::{complexity, tier_for_complexity};
use std::path::Path;

pub fn run(
    config_path: Option<&Path>,
    url: &str,
    source: SourceArgs,
    json: bool,
) -> anyhow::Result<()> {
    let site = SiteUrl::parse(url)?;
    let config = load_config(config_path)?;

    let outcome = fetch_audit(&config, source, &site);
    print_warnings(&outcome.warnings);

    let classified = classify_all(&outcome.report.issues);
    let summary = AuditSummary::from_classified(outcome.report.pages_analyzed, &classified);
    let score = complexity(&classified);
    let recommended = tier_for_complexity(score);

    if json {
        let value = serde_json::json!({
            "site": site.as_str(),
            "data_source": outcome.source,
            "summary": summary,
            "complexity": score,
            "recommended_tier": recommended,
            "issues": classified,
        });
        return print_json(&value);
    }

    println!("Audit of {} ({} data)", site, outcome.source);
    println!();
    if classified.is_empty() {
        println!("No issues found.");
    } else {
        let rows: Vec<Vec<String>> = classified
            .iter()
            .map(|c| {
                vec![
                    c.kind.clone(),
                    c.category.to_string(),
                    c.severity.to_string(),
                    c.affected_count.to_string(),
                    hours(c.estimated_hours),
                ]
            })
            .collect();
        print_table(&["ISSUE", "CATEGORY", "SEVERITY", "AFFECTED", "HOURS"], rows);
    }

    println!();
    println!("Pages analyzed:   {}", summary.pages_analyzed);
    println!(
        "Issues:           {} ({} critical, {} important, {} medium)",
        summary.total_issues,
        summary.critical_issues,
        summary.important_issues,
        summary.medium_issues
    );
    println!("Estimated fixes:  {}", hours(summary.estimated_fix_hours));
    println!("Complexity:       {score} (recommended tier: {recommended})");
    Ok(())
}
