use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$STUDYSIM_HOME`, or `~/.studysim`.
pub fn studysim_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("STUDYSIM_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".studysim"))
}

pub fn ensure_studysim_home() -> Result<PathBuf> {
    let dir = studysim_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
