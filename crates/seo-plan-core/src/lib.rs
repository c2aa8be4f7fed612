pub mod audit;
pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod io;
pub mod plan;
pub mod profile;
pub mod schedule;
pub mod site;
pub mod task;
pub mod tier;
pub mod types;

pub use error::{PlanError, Result};
