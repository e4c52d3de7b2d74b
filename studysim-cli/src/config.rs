use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use studysim_core::{Strategy, Subject};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub plan: PlanSection,
    pub subjects: SubjectSection,
    pub simulation: SimulationSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanSection {
    /// IANA timezone used for date-only inputs.
    pub timezone: String,
    pub default_daily_hours: f64,
    pub default_period_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectSection {
    pub default_load_unit: String,
    pub default_priority: u8,
    /// Minutes per load unit.
    pub default_speed_minutes: f64,
    pub default_target_rounds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub default_strategy: Strategy,
}

impl Default for PlanSection {
    fn default() -> Self {
        Self {
            timezone: "Asia/Seoul".to_string(),
            default_daily_hours: 4.0,
            default_period_days: 30,
        }
    }
}

impl Default for SubjectSection {
    fn default() -> Self {
        Self {
            default_load_unit: "pages".to_string(),
            default_priority: 3,
            default_speed_minutes: 10.0,
            default_target_rounds: 3,
        }
    }
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            default_strategy: Strategy::Equal,
        }
    }
}

impl SubjectSection {
    /// A new subject carrying the configured defaults.
    pub fn new_subject(&self, id: impl Into<String>, name: impl Into<String>) -> Subject {
        Subject::new(id, name)
            .with_load(0.0, self.default_load_unit.clone())
            .with_speed(self.default_speed_minutes)
            .with_priority(self.default_priority)
            .with_target_rounds(self.default_target_rounds)
    }
}

pub fn config_path(home: &Path) -> PathBuf {
    home.join("config.toml")
}

pub fn load_config(home: &Path) -> Result<Config> {
    let p = config_path(home);
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config(home: &Path, cfg: &Config) -> Result<()> {
    let p = config_path(home);
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Write the default config unless one exists. Returns whether it wrote.
pub fn init_config(home: &Path) -> Result<bool> {
    if config_path(home).exists() {
        return Ok(false);
    }
    save_config(home, &Config::default())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_config(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn init_writes_once_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        assert!(init_config(dir.path()).unwrap());
        assert!(!init_config(dir.path()).unwrap());
        assert_eq!(load_config(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            config_path(dir.path()),
            "[simulation]\ndefault_strategy = \"target-rounds\"\n\n[plan]\ndefault_daily_hours = 6.5\n",
        )
        .unwrap();

        let cfg = load_config(dir.path()).unwrap();
        assert_eq!(cfg.simulation.default_strategy, Strategy::TargetRounds);
        assert_eq!(cfg.plan.default_daily_hours, 6.5);
        assert_eq!(cfg.plan.timezone, "Asia/Seoul");
        assert_eq!(cfg.subjects, SubjectSection::default());
    }

    #[test]
    fn broken_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(config_path(dir.path()), "[plan\n").unwrap();
        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn new_subject_uses_defaults() {
        let s = SubjectSection::default().new_subject("1", "Physics");
        assert_eq!(s.priority, 3);
        assert_eq!(s.target_rounds, 3);
        assert_eq!(s.study_speed_per_page, 10.0);
        assert_eq!(s.load_unit, "pages");
    }
}
