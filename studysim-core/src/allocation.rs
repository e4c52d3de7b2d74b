//! Allocation policies: split the available hours across subjects and report
//! the rounds each subject reaches.
//!
//! Equal and priority-weighted distribution keep the input order. The
//! target-rounds policy lives in [`crate::target_rounds`] and reorders by
//! priority.

use crate::math::{safe_divide, usable_budget};
use crate::model::{SimulationResultData, Subject};
use crate::workload::calculate_subject_round_time;

/// A policy that turns total hours into per-subject rounds.
///
/// Implementations return exactly one record per subject and never mutate
/// their inputs.
pub trait Allocator: Send + Sync {
    fn distribute(&self, subjects: &[Subject], total_hours: f64) -> Vec<SimulationResultData>;
}

/// Every subject gets the same number of passes over the combined material.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualDistribution;

/// Hours are shared in proportion to priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityDistribution;

impl Allocator for EqualDistribution {
    fn distribute(&self, subjects: &[Subject], total_hours: f64) -> Vec<SimulationResultData> {
        simulate_equal_distribution(subjects, total_hours)
    }
}

impl Allocator for PriorityDistribution {
    fn distribute(&self, subjects: &[Subject], total_hours: f64) -> Vec<SimulationResultData> {
        simulate_priority_distribution(subjects, total_hours)
    }
}

pub fn simulate_equal_distribution(
    subjects: &[Subject],
    total_hours: f64,
) -> Vec<SimulationResultData> {
    let time_for_one_round: f64 = subjects.iter().map(calculate_subject_round_time).sum();
    let possible_rounds = safe_divide(usable_budget(total_hours), time_for_one_round);

    subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| SimulationResultData::new(subject, possible_rounds, i))
        .collect()
}

pub fn simulate_priority_distribution(
    subjects: &[Subject],
    total_hours: f64,
) -> Vec<SimulationResultData> {
    let total_hours = usable_budget(total_hours);
    let total_priority: f64 = subjects.iter().map(|s| f64::from(s.priority)).sum();

    subjects
        .iter()
        .enumerate()
        .map(|(i, subject)| {
            let weight = safe_divide(f64::from(subject.priority), total_priority);
            let allocated = total_hours * weight;
            let rounds = safe_divide(allocated, calculate_subject_round_time(subject));
            SimulationResultData::new(subject, rounds, i)
        })
        .collect()
}
