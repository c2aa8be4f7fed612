//! Task-tracker CSV in ClickUp's import layout.
//!
//! Row order: immediate tasks (each followed by its page-range subtasks),
//! strategic initiatives, every occurrence of each recurring task, then one
//! project overview row.

use crate::config::ExportConfig;
use crate::error::Result;
use crate::io;
use crate::plan::Plan;
use crate::schedule::{due_date, expand, month_label, PLAN_MONTHS};
use crate::task::Task;
use crate::types::{Frequency, Priority};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Priority")]
    pub priority: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Assignee")]
    pub assignee: String,
    #[serde(rename = "Due Date")]
    pub due_date: String,
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "List")]
    pub list: String,
    /// Minutes.
    #[serde(rename = "Time Estimate")]
    pub time_estimate: u32,
    #[serde(rename = "Parent Task")]
    pub parent_task: String,
    #[serde(rename = "Folder")]
    pub folder: String,
    #[serde(rename = "Space")]
    pub space: String,
}

fn minutes(hours: f64) -> u32 {
    (hours * 60.0).round().max(0.0) as u32
}

fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// ClickUp's own priority scale.
fn tracker_priority(priority: Priority) -> &'static str {
    match priority {
        Priority::Critical => "High",
        Priority::Important => "Normal",
        Priority::Medium | Priority::Strategic => "Low",
    }
}

struct RowContext<'a> {
    plan: &'a Plan,
    folder: String,
    space: &'a str,
    subtask_threshold: u32,
}

impl RowContext<'_> {
    fn row(&self, name: String, description: String, priority: &str, status: &str) -> CsvRow {
        CsvRow {
            name,
            description,
            priority: priority.to_string(),
            status: status.to_string(),
            assignee: String::new(),
            due_date: String::new(),
            tags: String::new(),
            list: String::new(),
            time_estimate: 0,
            parent_task: String::new(),
            folder: self.folder.clone(),
            space: self.space.to_string(),
        }
    }

    fn due(&self, month: u8) -> String {
        format_date(due_date(self.plan.start_date, month))
    }

    fn one_time(&self, task: &Task, rows: &mut Vec<CsvRow>) {
        let month = task.month.unwrap_or(1);
        let bucket = task.priority.bucket();
        let pages = task
            .pages_affected
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let name = format!("{}: {}", bucket.to_uppercase(), task.title);

        let mut description = format!(
            "Priority: {} | Category: {} | Pages affected: {} | Phase: {}",
            task.priority, task.category, pages, task.phase
        );
        if !task.description.is_empty() {
            description.push_str(" | ");
            description.push_str(&task.description);
        }

        let mut main = self.row(name.clone(), description, tracker_priority(task.priority), "to do");
        main.due_date = self.due(month);
        main.tags = format!("SEO,{},{},{}", bucket, task.category, self.plan.tier);
        main.list = bucket.to_string();
        main.time_estimate = minutes(task.hours);
        rows.push(main);

        let affected = task.pages_affected.unwrap_or(0);
        if task.priority == Priority::Critical && affected > self.subtask_threshold {
            let per_subtask = (affected / 3).max(5);
            let count = affected.div_ceil(per_subtask);
            for i in 0..count {
                let first = i * per_subtask + 1;
                let last = ((i + 1) * per_subtask).min(affected);
                let mut sub = self.row(
                    format!("Pages {first}-{last}: {}", task.title),
                    format!("Handle pages {first} through {last} for: {}", task.title),
                    tracker_priority(task.priority),
                    "to do",
                );
                sub.due_date = self.due(month);
                sub.tags = format!("SEO,{},{},Subtask", bucket, task.category);
                sub.list = bucket.to_string();
                sub.time_estimate = minutes(task.hours / f64::from(count));
                sub.parent_task = name.clone();
                rows.push(sub);
            }
        }
    }

    fn recurring(&self, task: &Task, rows: &mut Vec<CsvRow>) {
        let freq = task.frequency;
        for (i, occ) in expand(task).iter().enumerate() {
            let month = occ.month.unwrap_or(1);
            let period = match freq {
                Frequency::Monthly => month_label(self.plan.start_date, month),
                Frequency::Quarterly => format!("Q{}", i + 1),
                Frequency::Biannual => format!("H{}", i + 1),
                Frequency::Once => String::new(),
            };
            let mut name = format!(
                "RECURRING ({}): {}",
                freq.as_str().to_uppercase(),
                task.title
            );
            if !period.is_empty() {
                name.push_str(" - ");
                name.push_str(&period);
            }
            let description = format!(
                "Recurring task: {} | Frequency: {} | Category: {} | Hours: {}",
                task.title, freq, task.category, task.hours
            );
            let status = if i == 0 { "to do" } else { "future" };
            let mut row = self.row(name, description, "Normal", status);
            row.due_date = self.due(month);
            row.tags = format!(
                "SEO,Recurring,{},{},{}",
                freq, task.category, self.plan.tier
            );
            row.list = task.priority.bucket().to_string();
            row.time_estimate = minutes(task.hours);
            rows.push(row);
        }
    }

    fn overview(&self) -> CsvRow {
        let plan = self.plan;
        let mut row = self.row(
            format!("SEO Project Overview - {}", plan.domain),
            format!(
                "12-month SEO project for {} | Tier: {} | Monthly Hours: {} | Investment: {}",
                plan.client, plan.tier, plan.actual_hours, plan.investment
            ),
            "High",
            "in progress",
        );
        row.due_date = self.due(PLAN_MONTHS);
        row.tags = format!("SEO,Project,Overview,{}", plan.tier);
        row.list = "SEO Projects".to_string();
        row.time_estimate = minutes(plan.actual_hours * f64::from(PLAN_MONTHS));
        row
    }
}

pub fn rows(plan: &Plan, config: &ExportConfig) -> Vec<CsvRow> {
    let ctx = RowContext {
        plan,
        folder: config.folder_for(&plan.domain),
        space: &config.space,
        subtask_threshold: config.subtask_threshold,
    };

    let mut rows = Vec::new();
    for task in &plan.immediate_tasks {
        ctx.one_time(&task.occurrence(1), &mut rows);
    }
    for task in &plan.strategic_tasks {
        ctx.one_time(&task.occurrence(task.phase.start_month()), &mut rows);
    }
    for task in &plan.recurring_tasks {
        ctx.recurring(task, &mut rows);
    }
    rows.push(ctx.overview());
    rows
}

pub fn to_csv(plan: &Plan, config: &ExportConfig) -> Result<Vec<u8>> {
    let mut wtr = ::csv::Writer::from_writer(Vec::new());
    for row in rows(plan, config) {
        wtr.serialize(row)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

pub fn write_csv(plan: &Plan, config: &ExportConfig, path: &Path) -> Result<()> {
    let data = to_csv(plan, config)?;
    io::atomic_write(path, &data)?;
    tracing::info!(path = %path.display(), "wrote task csv");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
