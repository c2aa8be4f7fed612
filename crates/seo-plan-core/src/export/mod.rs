//! Plan exporters. Each writes one file and fails independently.

pub mod csv;
pub mod json;

use chrono::NaiveDate;
use std::path::PathBuf;

/// `{domain}_seo_plan_{YYYYMMDD}.json`
pub fn default_json_path(domain: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("{}_seo_plan_{}.json", domain, date.format("%Y%m%d")))
}

/// `{domain}_seo_tasks_clickup_{YYYYMMDD}.csv`
pub fn default_csv_path(domain: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "{}_seo_tasks_clickup_{}.csv",
        domain,
        date.format("%Y%m%d")
    ))
}
