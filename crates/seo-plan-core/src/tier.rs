use crate::classifier::ClassifiedIssue;
use crate::error::PlanError;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Complexity at or below this recommends Starter.
pub const STARTER_MAX_COMPLEXITY: u32 = 10;
/// Complexity at or below this (and above Starter) recommends Business.
pub const BUSINESS_MAX_COMPLEXITY: u32 = 35;

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Starter,
    Business,
    Pro,
}

/// Fixed commercial attributes of a tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierSpec {
    pub name: &'static str,
    pub monthly_price: u32,
    pub base_hours: f64,
}

impl Tier {
    pub fn all() -> &'static [Tier] {
        &[Tier::Starter, Tier::Business, Tier::Pro]
    }

    pub fn spec(self) -> TierSpec {
        match self {
            Tier::Starter => TierSpec {
                name: "Starter",
                monthly_price: 899,
                base_hours: 20.0,
            },
            Tier::Business => TierSpec {
                name: "Business",
                monthly_price: 1399,
                base_hours: 35.0,
            },
            Tier::Pro => TierSpec {
                name: "Pro",
                monthly_price: 2199,
                base_hours: 55.0,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Starter => "starter",
            Tier::Business => "business",
            Tier::Pro => "pro",
        }
    }

    pub fn monthly_price(self) -> u32 {
        self.spec().monthly_price
    }

    pub fn base_hours(self) -> f64 {
        self.spec().base_hours
    }

    /// Display form of the monthly price: "$1,399/month".
    pub fn investment(self) -> String {
        format!("${}/month", thousands(self.monthly_price()))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starter" => Ok(Tier::Starter),
            "business" => Ok(Tier::Business),
            "pro" => Ok(Tier::Pro),
            _ => Err(PlanError::InvalidTier(s.to_string())),
        }
    }
}

fn thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// `3·critical + 2·important + 1·medium`, counted per affected unit so the
/// score matches [`AuditSummary`](crate::classifier::AuditSummary) however the
/// audit groups its findings.
pub fn complexity(issues: &[ClassifiedIssue]) -> u32 {
    issues.iter().fold(0u32, |acc, i| {
        acc.saturating_add(i.severity.weight().saturating_mul(i.units()))
    })
}

pub fn tier_for_complexity(score: u32) -> Tier {
    if score <= STARTER_MAX_COMPLEXITY {
        Tier::Starter
    } else if score <= BUSINESS_MAX_COMPLEXITY {
        Tier::Business
    } else {
        Tier::Pro
    }
}

pub fn recommend_tier(issues: &[ClassifiedIssue]) -> Tier {
    let score = complexity(issues);
    let tier = tier_for_complexity(score);
    tracing::debug!(
        complexity = score,
        critical = issues
            .iter()
            .filter(|i| i.severity == Severity::Critical)
            .fold(0u32, |acc, i| acc.saturating_add(i.units())),
        tier = %tier,
        "recommended tier"
    );
    tier
}

// ---------------------------------------------------------------------------
// Selection with override
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resourcing {
    Over,
    Under,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAdvisory {
    pub requested: Tier,
    pub recommended: Tier,
    pub resourcing: Resourcing,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSelection {
    pub recommended: Tier,
    pub chosen: Tier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisory: Option<TierAdvisory>,
}

/// Honour an explicit tier request. A mismatch with the recommendation is
/// never an error; it produces an advisory instead.
pub fn select_tier(recommended: Tier, requested: Option<Tier>) -> TierSelection {
    let chosen = requested.unwrap_or(recommended);
    let advisory = (chosen != recommended).then(|| {
        let resourcing = if chosen > recommended {
            Resourcing::Over
        } else {
            Resourcing::Under
        };
        let word = match resourcing {
            Resourcing::Over => "over-resourced",
            Resourcing::Under => "under-resourced",
        };
        TierAdvisory {
            requested: chosen,
            recommended,
            resourcing,
            message: format!(
                "requested tier '{chosen}' may be {word} for audit findings (recommended: '{recommended}')"
            ),
        }
    });
    if let Some(a) = &advisory {
        tracing::warn!(requested = %chosen, recommended = %recommended, "{}", a.message);
    }
    TierSelection {
        recommended,
        chosen,
        advisory,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
