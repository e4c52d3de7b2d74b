//! Plan, subject and result records exchanged with the front end.
//!
//! Field names serialize in camelCase so stored records stay compatible with
//! the JSON the browser version keeps in local storage.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::math::achievement_rate;

/// Colors cycled over result positions when rendering charts.
pub const CHART_PALETTE: [&str; 9] = [
    "hsl(var(--chart-1))",
    "hsl(var(--chart-2))",
    "hsl(var(--chart-3))",
    "hsl(var(--chart-4))",
    "hsl(var(--chart-5))",
    "hsl(var(--chart-6))",
    "hsl(var(--chart-7))",
    "hsl(var(--chart-8))",
    "hsl(var(--chart-9))",
];

pub fn chart_color(index: usize) -> &'static str {
    CHART_PALETTE[index % CHART_PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub exam_name: String,
    pub study_start_date: DateTime<Utc>,
    pub study_end_date: DateTime<Utc>,
    /// Hours per day, passed through to the total without clamping.
    pub daily_study_hours: f64,
}

impl StudyPlan {
    pub fn new(
        exam_name: impl Into<String>,
        study_start_date: DateTime<Utc>,
        study_end_date: DateTime<Utc>,
        daily_study_hours: f64,
    ) -> Self {
        Self {
            exam_name: exam_name.into(),
            study_start_date,
            study_end_date,
            daily_study_hours,
        }
    }

    /// Blank plan starting `now` and running `period_days`.
    pub fn starting_at(now: DateTime<Utc>, period_days: i64, daily_study_hours: f64) -> Self {
        Self::new("", now, now + Duration::days(period_days), daily_study_hours)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,

    /// Units of work, e.g. pages.
    pub total_load: f64,
    pub load_unit: String,

    /// Minutes per load unit.
    pub study_speed_per_page: f64,

    /// 1-5, higher gets more time.
    pub priority: u8,

    pub target_rounds: u32,
}

impl Subject {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_load: 0.0,
            load_unit: "pages".to_string(),
            study_speed_per_page: 10.0,
            priority: 3,
            target_rounds: 3,
        }
    }

    pub fn with_load(mut self, total_load: f64, unit: impl Into<String>) -> Self {
        self.total_load = total_load;
        self.load_unit = unit.into();
        self
    }

    pub fn with_speed(mut self, minutes_per_unit: f64) -> Self {
        self.study_speed_per_page = minutes_per_unit;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_target_rounds(mut self, target_rounds: u32) -> Self {
        self.target_rounds = target_rounds;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResultData {
    pub subject_name: String,
    pub rounds: f64,
    pub target_rounds: u32,
    pub achievement_rate: f64,
    pub color: String,
}

impl SimulationResultData {
    pub fn new(subject: &Subject, rounds: f64, position: usize) -> Self {
        Self {
            subject_name: subject.name.clone(),
            rounds,
            target_rounds: subject.target_rounds,
            achievement_rate: achievement_rate(rounds, subject.target_rounds),
            color: chart_color(position).to_string(),
        }
    }

    /// Add fractional rounds and refresh the derived rate.
    pub fn add_rounds(&mut self, rounds: f64) {
        self.rounds += rounds;
        self.achievement_rate = achievement_rate(self.rounds, self.target_rounds);
    }
}
