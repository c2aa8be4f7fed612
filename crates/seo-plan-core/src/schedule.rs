//! Recurring maintenance calendars and strategic initiatives per tier.
//!
//! Months are plan-relative: month 1 is the first month of the engagement.
//! Quarterly work lands at the end of each plan quarter (3, 6, 9, 12) and
//! bi-annual work at the end of each half (6, 12). The CSV due dates use the
//! same numbering through [`due_date`].

use crate::task::Task;
use crate::tier::Tier;
use crate::types::{Category, Frequency, Phase, Priority};
use chrono::{Months, NaiveDate};

pub const PLAN_MONTHS: u8 = 12;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub category: Category,
    pub priority: Priority,
    pub hours: f64,
    pub frequency: Frequency,
    pub phase: Phase,
}

impl TaskTemplate {
    fn to_task(&self) -> Task {
        Task::new(
            self.title,
            self.category,
            self.priority,
            self.hours,
            self.frequency,
            self.phase,
        )
    }
}

macro_rules! template {
    ($title:expr, $cat:ident, $prio:ident, $hours:expr, $freq:ident, $phase:ident) => {
        TaskTemplate {
            title: $title,
            category: Category::$cat,
            priority: Priority::$prio,
            hours: $hours,
            frequency: Frequency::$freq,
            phase: Phase::$phase,
        }
    };
}

const STARTER_RECURRING: &[TaskTemplate] = &[
    template!("Technical SEO monitoring and health checks", Technical, Important, 2.0, Monthly, Measure),
    template!("Performance reporting", Other, Medium, 1.5, Monthly, Measure),
    template!("Keyword ranking review", OnPage, Medium, 1.5, Quarterly, Learn),
    template!("Local citation audit", LocalSeo, Medium, 2.0, Biannual, Learn),
];

const BUSINESS_RECURRING: &[TaskTemplate] = &[
    template!("Technical SEO monitoring and health checks", Technical, Important, 3.5, Monthly, Measure),
    template!("Performance reporting", Other, Medium, 2.8, Monthly, Measure),
    template!("Keyword optimization", OnPage, Important, 2.1, Monthly, Learn),
    template!("Content strategy review", Content, Strategic, 2.8, Quarterly, Learn),
    template!("Comprehensive technical SEO audit", Technical, Important, 4.0, Biannual, Measure),
];

const PRO_RECURRING: &[TaskTemplate] = &[
    template!("Technical SEO monitoring and health checks", Technical, Important, 5.0, Monthly, Measure),
    template!("Performance reporting and analytics review", Other, Medium, 4.0, Monthly, Measure),
    template!("Keyword optimization", OnPage, Important, 3.5, Monthly, Learn),
    template!("Content creation", Content, Important, 6.0, Monthly, Learn),
    template!("Authority link building outreach", Other, Important, 4.0, Monthly, Learn),
    template!("Content strategy review", Content, Strategic, 4.0, Quarterly, Learn),
    template!("Competitor analysis", Other, Strategic, 3.0, Quarterly, Learn),
    template!("Comprehensive technical SEO audit", Technical, Important, 6.0, Biannual, Measure),
];

const STARTER_STRATEGIC: &[TaskTemplate] = &[
    template!("Set up rank tracking and analytics baseline", Other, Strategic, 2.0, Once, Measure),
    template!("Review results and refine keyword targets", OnPage, Strategic, 2.0, Once, Learn),
];

const BUSINESS_STRATEGIC: &[TaskTemplate] = &[
    template!("Set up rank tracking and analytics baseline", Other, Strategic, 2.0, Once, Measure),
    template!("Competitor gap analysis", Other, Strategic, 3.0, Once, Measure),
    template!("Develop 12-month content roadmap", Content, Strategic, 4.0, Once, Learn),
];

const PRO_STRATEGIC: &[TaskTemplate] = &[
    template!("Set up rank tracking and analytics baseline", Other, Strategic, 2.0, Once, Measure),
    template!("Competitor gap analysis", Other, Strategic, 3.0, Once, Measure),
    template!("Develop 12-month content roadmap", Content, Strategic, 4.0, Once, Learn),
    template!("Conversion rate optimization review", Performance, Strategic, 4.0, Once, Learn),
    template!("Digital PR campaign plan", Content, Strategic, 5.0, Once, Learn),
];

pub fn recurring_templates(tier: Tier) -> &'static [TaskTemplate] {
    match tier {
        Tier::Starter => STARTER_RECURRING,
        Tier::Business => BUSINESS_RECURRING,
        Tier::Pro => PRO_RECURRING,
    }
}

pub fn strategic_templates(tier: Tier) -> &'static [TaskTemplate] {
    match tier {
        Tier::Starter => STARTER_STRATEGIC,
        Tier::Business => BUSINESS_STRATEGIC,
        Tier::Pro => PRO_STRATEGIC,
    }
}

pub fn recurring_tasks(tier: Tier) -> Vec<Task> {
    recurring_templates(tier).iter().map(TaskTemplate::to_task).collect()
}

/// One-time strategic initiatives bundled with the tier.
pub fn strategic_tasks(tier: Tier) -> Vec<Task> {
    strategic_templates(tier).iter().map(TaskTemplate::to_task).collect()
}

// ---------------------------------------------------------------------------
// Month expansion
// ---------------------------------------------------------------------------

pub fn months_for(frequency: Frequency) -> Vec<u8> {
    match frequency {
        Frequency::Once => vec![1],
        Frequency::Monthly => (1..=PLAN_MONTHS).collect(),
        Frequency::Quarterly => vec![3, 6, 9, 12],
        Frequency::Biannual => vec![6, 12],
    }
}

/// Every scheduled occurrence of `task` inside the plan window.
pub fn expand(task: &Task) -> Vec<Task> {
    months_for(task.frequency)
        .into_iter()
        .map(|m| task.occurrence(m))
        .collect()
}

// ---------------------------------------------------------------------------
// Calendar mapping
// ---------------------------------------------------------------------------

/// Due date for work scheduled in plan `month`: the end of that month,
/// measured from `start`.
pub fn due_date(start: NaiveDate, month: u8) -> NaiveDate {
    start
        .checked_add_months(Months::new(u32::from(month)))
        .unwrap_or(NaiveDate::MAX)
}

/// Calendar label for plan `month`, e.g. "March 2026".
pub fn month_label(start: NaiveDate, month: u8) -> String {
    let first = start
        .checked_add_months(Months::new(u32::from(month.saturating_sub(1))))
        .unwrap_or(start);
    first.format("%B %Y").to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
