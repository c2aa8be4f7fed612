use crate::output::{hours, print_heading, print_json, print_table};
use seo_plan_core::schedule::{months_for, recurring_templates, strategic_templates};
use seo_plan_core::tier::Tier;

pub fn run(json: bool) -> anyhow::Result<()> {
    if json {
        let tiers: Vec<serde_json::Value> = Tier::all()
            .iter()
            .map(|&tier| {
                let recurring: Vec<serde_json::Value> = recurring_templates(tier)
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "title": t.title,
                            "category": t.category,
                            "hours": t.hours,
                            "frequency": t.frequency,
                            "months": months_for(t.frequency),
                        })
                    })
                    .collect();
                let strategic: Vec<&str> =
                    strategic_templates(tier).iter().map(|t| t.title).collect();
                serde_json::json!({
                    "tier": tier,
                    "investment": tier.investment(),
                    "monthly_price": tier.monthly_price(),
                    "base_hours": tier.base_hours(),
                    "recurring": recurring,
                    "strategic": strategic,
                })
            })
            .collect();
        return print_json(&tiers);
    }

    let rows: Vec<Vec<String>> = Tier::all()
        .iter()
        .map(|&tier| {
            vec![
                tier.to_string(),
                tier.investment(),
                hours(tier.base_hours()),
            ]
        })
        .collect();
    print_table(&["TIER", "INVESTMENT", "HOURS/MONTH"], rows);

    for &tier in Tier::all() {
        print_heading(&format!("{tier} recurring calendar"));
        let rows: Vec<Vec<String>> = recurring_templates(tier)
            .iter()
            .map(|t| {
                let months: Vec<String> =
                    months_for(t.frequency).iter().map(u8::to_string).collect();
                vec![
                    t.frequency.to_string(),
                    hours(t.hours),
                    months.join(","),
                    t.title.to_string(),
                ]
            })
            .collect();
        print_table(&["FREQUENCY", "HOURS", "MONTHS", "TASK"], rows);
    }
    Ok(())
}
