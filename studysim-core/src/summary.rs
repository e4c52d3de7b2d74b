//! Saved simulation record and its headline numbers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{SimulationResultData, StudyPlan, Subject};
use crate::strategy::Strategy;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSummary {
    /// Mean achievement rate over all results.
    pub total_achievement_rate: f64,
    pub best_subject: String,
    pub worst_subject: String,
}

impl SimulationSummary {
    /// `None` for an empty result list. Ties keep the earliest record.
    pub fn from_results(results: &[SimulationResultData]) -> Option<Self> {
        let first = results.first()?;

        let mut best = first;
        let mut worst = first;
        let mut sum = 0.0;
        for r in results {
            sum += r.achievement_rate;
            if r.achievement_rate > best.achievement_rate {
                best = r;
            }
            if r.achievement_rate < worst.achievement_rate {
                worst = r;
            }
        }

        Some(Self {
            total_achievement_rate: sum / results.len() as f64,
            best_subject: best.subject_name.clone(),
            worst_subject: worst.subject_name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSimulation {
    pub strategy: Strategy,
    pub results: Vec<SimulationResultData>,
    pub study_plan: StudyPlan,
    pub subjects: Vec<Subject>,
    pub timestamp: DateTime<Utc>,
    pub total_achievement_rate: f64,
    pub best_subject: String,
    pub worst_subject: String,
}

impl SavedSimulation {
    /// Returns `None` when there is nothing to save.
    pub fn new(
        strategy: Strategy,
        study_plan: StudyPlan,
        subjects: Vec<Subject>,
        results: Vec<SimulationResultData>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let summary = SimulationSummary::from_results(&results)?;
        Some(Self {
            strategy,
            results,
            study_plan,
            subjects,
            timestamp: now,
            total_achievement_rate: summary.total_achievement_rate,
            best_subject: summary.best_subject,
            worst_subject: summary.worst_subject,
        })
    }
}
