//! Client questionnaire answers.
//!
//! Each answer leans towards one tier; the profile's tier is the rounded mean
//! of the answers given. It is only ever advisory: the recommendation made
//! from audit findings stays authoritative.

use crate::error::{PlanError, Result};
use crate::tier::Tier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessSize {
    SmallLocal,
    Growing,
    Established,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Competition {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Budget {
    #[serde(rename = "under_1000")]
    Under1000,
    #[serde(rename = "1000_1500")]
    From1000To1500,
    #[serde(rename = "over_1500")]
    Over1500,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goals {
    Foundation,
    Growth,
    AggressiveGrowth,
}

impl std::str::FromStr for BusinessSize {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small_local" => Ok(BusinessSize::SmallLocal),
            "growing" => Ok(BusinessSize::Growing),
            "established" => Ok(BusinessSize::Established),
            _ => Err(invalid("business size", s, "small_local, growing, established")),
        }
    }
}

impl std::str::FromStr for Competition {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "low" => Ok(Competition::Low),
            "medium" => Ok(Competition::Medium),
            "high" => Ok(Competition::High),
            _ => Err(invalid("competition", s, "low, medium, high")),
        }
    }
}

impl std::str::FromStr for Budget {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "under_1000" => Ok(Budget::Under1000),
            "1000_1500" => Ok(Budget::From1000To1500),
            "over_1500" => Ok(Budget::Over1500),
            _ => Err(invalid("budget", s, "under_1000, 1000_1500, over_1500")),
        }
    }
}

impl std::str::FromStr for Goals {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "foundation" => Ok(Goals::Foundation),
            "growth" => Ok(Goals::Growth),
            "aggressive_growth" => Ok(Goals::AggressiveGrowth),
            _ => Err(invalid("goals", s, "foundation, growth, aggressive_growth")),
        }
    }
}

fn invalid(field: &'static str, value: &str, expected: &'static str) -> PlanError {
    PlanError::InvalidProfile {
        field,
        value: value.to_string(),
        expected,
    }
}

// ---------------------------------------------------------------------------
// BusinessProfile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_size: Option<BusinessSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<Competition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<Goals>,
}

impl BusinessProfile {
    pub fn is_empty(&self) -> bool {
        self.business_size.is_none()
            && self.competition.is_none()
            && self.budget.is_none()
            && self.goals.is_none()
    }

    /// Tier the answers point to, or `None` if nothing was answered.
    pub fn suggested_tier(&self) -> Option<Tier> {
        let leans: Vec<u32> = [
            self.business_size.map(|v| v as u32),
            self.competition.map(|v| v as u32),
            self.budget.map(|v| v as u32),
            self.goals.map(|v| v as u32),
        ]
        .into_iter()
        .flatten()
        .collect();
        if leans.is_empty() {
            return None;
        }
        let mean = leans.iter().sum::<u32>() as f64 / leans.len() as f64;
        Some(match mean.round() as u32 {
            0 => Tier::Starter,
            1 => Tier::Business,
            _ => Tier::Pro,
        })
    }

    /// Advisory text when the questionnaire disagrees with the chosen tier.
    pub fn advisory(&self, chosen: Tier) -> Option<String> {
        let suggested = self.suggested_tier()?;
        (suggested != chosen).then(|| {
            format!(
                "client profile suggests the '{suggested}' tier, but the plan uses '{chosen}'"
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_suggests_nothing() {
        let p = BusinessProfile::default();
        assert!(p.is_empty());
        assert_eq!(p.suggested_tier(), None);
        assert_eq!(p.advisory(Tier::Pro), None);
    }

    #[test]
    fn unanimous_answers_pick_that_tier() {
        let p = BusinessProfile {
            business_size: Some(BusinessSize::Established),
            competition: Some(Competition::High),
            budget: Some(Budget::Over1500),
            goals: Some(Goals::AggressiveGrowth),
        };
        assert_eq!(p.suggested_tier(), Some(Tier::Pro));
        assert!(p.advisory(Tier::Starter).unwrap().contains("'pro'"));
        assert_eq!(p.advisory(Tier::Pro), None);
    }

    #[test]
    fn mixed_answers_round_to_the_middle() {
        let p = BusinessProfile {
            business_size: Some(BusinessSize::SmallLocal),
            competition: Some(Competition::High),
            budget: None,
            goals: Some(Goals::Growth),
        };
        assert_eq!(p.suggested_tier(), Some(Tier::Business));
    }

    #[test]
    fn parse_rejects_unknown_answers() {
        assert_eq!("1000_1500".parse::<Budget>().unwrap(), Budget::From1000To1500);
        let err = "huge".parse::<BusinessSize>().unwrap_err();
        assert!(err.to_string().contains("business size"));
    }
}
