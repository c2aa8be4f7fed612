use crate::error::Result;
use crate::io;
use crate::plan::Plan;
use std::path::Path;

pub fn to_json(plan: &Plan) -> Result<String> {
    Ok(serde_json::to_string_pretty(plan)?)
}

pub fn write_plan(plan: &Plan, path: &Path) -> Result<()> {
    let data = to_json(plan)?;
    io::atomic_write(path, data.as_bytes())?;
    tracing::info!(path = %path.display(), "wrote plan json");
    Ok(())
}

pub fn read_plan(path: &Path) -> Result<Plan> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}
