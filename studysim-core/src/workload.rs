//! Workload model: how long one full review pass of a subject takes.

use crate::model::Subject;

/// Hours for one complete round: `total_load * minutes_per_unit / 60`.
pub fn calculate_subject_round_time(subject: &Subject) -> f64 {
    subject.total_load * subject.study_speed_per_page / 60.0
}
