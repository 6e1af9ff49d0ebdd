use anyhow::{Result, anyhow};
use std::path::PathBuf;

pub fn get_companion_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    Ok(home.join(".daily-companion"))
}

pub fn get_config_path() -> Result<PathBuf> {
    let dir = get_companion_dir()?;
    Ok(dir.join("config.toml"))
}

/// Directory holding persisted store snapshots, one JSON file per key.
pub fn get_snapshot_dir() -> Result<PathBuf> {
    let dir = get_companion_dir()?;
    Ok(dir.join("state"))
}

pub fn get_logs_dir() -> Result<PathBuf> {
    let dir = get_companion_dir()?;
    Ok(dir.join("logs"))
}

pub fn get_crash_log_path() -> Result<PathBuf> {
    let dir = get_companion_dir()?;
    Ok(dir.join("crash.log"))
}
