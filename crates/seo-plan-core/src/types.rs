use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technical,
    OnPage,
    Content,
    LocalSeo,
    Performance,
    Other,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Technical,
            Category::OnPage,
            Category::Content,
            Category::LocalSeo,
            Category::Performance,
            Category::Other,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::OnPage => "on_page",
            Category::Content => "content",
            Category::LocalSeo => "local_seo",
            Category::Performance => "performance",
            Category::Other => "other",
        }
    }

    /// Human-readable label used in task titles.
    pub fn label(self) -> &'static str {
        match self {
            Category::Technical => "technical",
            Category::OnPage => "on-page",
            Category::Content => "content",
            Category::LocalSeo => "local SEO",
            Category::Performance => "performance",
            Category::Other => "site",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = crate::error::PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technical" => Ok(Category::Technical),
            "on_page" | "on-page" => Ok(Category::OnPage),
            "content" => Ok(Category::Content),
            "local_seo" | "local-seo" => Ok(Category::LocalSeo),
            "performance" => Ok(Category::Performance),
            "other" => Ok(Category::Other),
            _ => Err(crate::error::PlanError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Important,
    Medium,
}

impl Severity {
    /// Higher is more urgent. Drives task ordering.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 3,
            Severity::Important => 2,
            Severity::Medium => 1,
        }
    }

    /// Contribution of one issue of this severity to the complexity score.
    pub fn weight(self) -> u32 {
        self.rank() as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Important => "important",
            Severity::Medium => "medium",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    Important,
    Medium,
    Strategic,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::Important => "important",
            Priority::Medium => "medium",
            Priority::Strategic => "strategic",
        }
    }

    /// Bucket name used for the task-tracker list column.
    pub fn bucket(self) -> &'static str {
        match self {
            Priority::Critical => "Critical",
            Priority::Important => "Important",
            Priority::Medium => "Medium",
            Priority::Strategic => "Strategic",
        }
    }
}

impl From<Severity> for Priority {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Critical => Priority::Critical,
            Severity::Important => Priority::Important,
            Severity::Medium => Priority::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Once,
    Monthly,
    Quarterly,
    Biannual,
}

impl Frequency {
    pub fn is_recurring(self) -> bool {
        !matches!(self, Frequency::Once)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Once => "once",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Biannual => "biannual",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// The five-phase delivery methodology every plan follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Setup,
    Plan,
    Build,
    Measure,
    Learn,
}

impl Phase {
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Setup,
            Phase::Plan,
            Phase::Build,
            Phase::Measure,
            Phase::Learn,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Plan => "plan",
            Phase::Build => "build",
            Phase::Measure => "measure",
            Phase::Learn => "learn",
        }
    }

    pub fn window(self) -> &'static str {
        match self {
            Phase::Setup => "week 1",
            Phase::Plan => "weeks 2-6",
            Phase::Build => "weeks 7-12",
            Phase::Measure => "months 3-4",
            Phase::Learn => "month 4+",
        }
    }

    /// First plan month in which work belonging to this phase is scheduled.
    pub fn start_month(self) -> u8 {
        match self {
            Phase::Setup | Phase::Plan => 1,
            Phase::Build => 2,
            Phase::Measure => 3,
            Phase::Learn => 4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
