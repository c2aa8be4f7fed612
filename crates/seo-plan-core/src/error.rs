use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("invalid url '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("invalid tier '{0}': expected starter, business, or pro")]
    InvalidTier(String),

    #[error("invalid {field} '{value}': expected one of {expected}")]
    InvalidProfile {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("invalid start date '{0}': expected YYYY-MM-DD")]
    InvalidStartDate(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PlanError>;
