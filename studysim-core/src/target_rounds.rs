//! Target-rounds optimized distribution.
//!
//! Two greedy phases over subjects ordered by priority (highest first, fewer
//! target rounds first among equals):
//! 1) one full round per subject while time lasts,
//! 2) top-ups of a tenth of a round, scanning repeatedly, until every
//!    subject reaches its target or time runs out.
//!
//! Output follows that priority order, not the input order.

use std::cmp::Ordering;

use tracing::debug;

use crate::allocation::Allocator;
use crate::math::{safe_divide, usable_budget};
use crate::model::{SimulationResultData, Subject};
use crate::workload::calculate_subject_round_time;

/// Share of a round handed out per top-up step.
const TOP_UP_FRACTION: f64 = 0.1;

/// Rounds within this distance of the target count as met.
const TARGET_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, Default)]
pub struct TargetRoundsDistribution;

impl Allocator for TargetRoundsDistribution {
    fn distribute(&self, subjects: &[Subject], total_hours: f64) -> Vec<SimulationResultData> {
        simulate_target_rounds(subjects, total_hours)
    }
}

/// Full outcome of the target-rounds policy.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetRoundsAllocation {
    pub results: Vec<SimulationResultData>,
    /// Hours left once every target is met (0 when time ran out).
    pub unused_hours: f64,
    /// Number of refinement scans performed in phase 2.
    pub refinement_passes: usize,
}

pub fn simulate_target_rounds(subjects: &[Subject], total_hours: f64) -> Vec<SimulationResultData> {
    allocate_target_rounds(subjects, total_hours).results
}

pub fn allocate_target_rounds(subjects: &[Subject], total_hours: f64) -> TargetRoundsAllocation {
    let order = priority_order(subjects);
    let round_times: Vec<f64> = order.iter().map(|s| calculate_subject_round_time(s)).collect();

    let mut remaining = usable_budget(total_hours);
    let mut results = Vec::with_capacity(order.len());

    // Phase 1: guarantee one round each, highest priority first.
    for (i, (subject, &round_time)) in order.iter().zip(&round_times).enumerate() {
        if remaining <= 0.0 {
            // Out of time: still report the subject, with nothing reached.
            results.push(SimulationResultData::new(subject, 0.0, i));
            continue;
        }

        let allocated = round_time.min(remaining);
        results.push(SimulationResultData::new(
            subject,
            safe_divide(allocated, round_time),
            i,
        ));
        remaining -= allocated;
    }

    // Phase 2: top up in tenths of a round until targets are met.
    let mut refinement_passes = 0;
    while remaining > 0.0 {
        let mut allocated_any = false;

        for (result, &round_time) in results.iter_mut().zip(&round_times) {
            if remaining <= 0.0 {
                break;
            }

            let gap = f64::from(result.target_rounds) - result.rounds;
            if gap <= TARGET_EPSILON || round_time <= 0.0 {
                continue;
            }

            let additional = (round_time * TOP_UP_FRACTION)
                .min(gap * round_time)
                .min(remaining);
            result.add_rounds(additional / round_time);
            remaining -= additional;
            allocated_any = true;
        }

        refinement_passes += 1;
        if !allocated_any {
            break;
        }
    }

    let unused_hours = remaining.max(0.0);
    debug!(
        subjects = results.len(),
        refinement_passes, unused_hours, "target-rounds allocation finished"
    );

    TargetRoundsAllocation {
        results,
        unused_hours,
        refinement_passes,
    }
}

/// Priority descending, then target rounds ascending. Stable for full ties.
pub fn priority_order(subjects: &[Subject]) -> Vec<&Subject> {
    let mut order: Vec<&Subject> = subjects.iter().collect();
    order.sort_by(|a, b| match b.priority.cmp(&a.priority) {
        Ordering::Equal => a.target_rounds.cmp(&b.target_rounds),
        other => other,
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Subject whose round takes `hours` (60 units at `hours` minutes each).
    fn subject(name: &str, hours: f64, priority: u8, target: u32) -> Subject {
        Subject::new(name, name)
            .with_load(60.0, "pages")
            .with_speed(hours)
            .with_priority(priority)
            .with_target_rounds(target)
    }

    fn names(results: &[SimulationResultData]) -> Vec<&str> {
        results.iter().map(|r| r.subject_name.as_str()).collect()
    }

    #[test]
    fn single_subject_reaches_target_and_leaves_surplus() {
        let out = allocate_target_rounds(&[subject("A", 10.0, 3, 2)], 25.0);

        assert_eq!(out.results.len(), 1);
        assert!((out.results[0].rounds - 2.0).abs() < 1e-9);
        assert!((out.results[0].achievement_rate - 100.0).abs() < 1e-6);
        assert!((out.unused_hours - 5.0).abs() < 1e-6);
    }

    #[test]
    fn orders_by_priority_then_fewer_targets() {
        let subjects = vec![
            subject("low", 1.0, 1, 1),
            subject("high-many", 1.0, 5, 4),
            subject("high-few", 1.0, 5, 2),
            subject("mid", 1.0, 3, 1),
        ];
        let out = simulate_target_rounds(&subjects, 100.0);
        assert_eq!(names(&out), vec!["high-few", "high-many", "mid", "low"]);
        assert_eq!(out[0].color, "hsl(var(--chart-1))");
        assert_eq!(out[3].color, "hsl(var(--chart-4))");
    }

    #[test]
    fn full_ties_keep_input_order() {
        let subjects = vec![subject("x", 1.0, 2, 2), subject("y", 1.0, 2, 2)];
        let out = simulate_target_rounds(&subjects, 1.0);
        assert_eq!(names(&out), vec!["x", "y"]);
    }

    #[test]
    fn exhausted_time_still_reports_every_subject() {
        let subjects = vec![
            subject("A", 10.0, 5, 3),
            subject("B", 10.0, 4, 3),
            subject("C", 10.0, 3, 3),
        ];
        let out = allocate_target_rounds(&subjects, 15.0);

        assert_eq!(names(&out.results), vec!["A", "B", "C"]);
        assert!((out.results[0].rounds - 1.0).abs() < 1e-9);
        assert!((out.results[1].rounds - 0.5).abs() < 1e-9);
        assert_eq!(out.results[2].rounds, 0.0);
        assert_eq!(out.results[2].achievement_rate, 0.0);
        assert_eq!(out.unused_hours, 0.0);
        assert_eq!(out.refinement_passes, 0);
    }

    #[test]
    fn refinement_scans_round_robin() {
        let subjects = vec![subject("A", 10.0, 3, 2), subject("B", 10.0, 3, 2)];
        let out = simulate_target_rounds(&subjects, 30.0);

        assert!((out[0].rounds - 1.5).abs() < 1e-9);
        assert!((out[1].rounds - 1.5).abs() < 1e-9);
    }

    #[test]
    fn met_targets_stop_refinement() {
        let subjects = vec![subject("A", 10.0, 3, 1), subject("B", 5.0, 2, 1)];
        let out = allocate_target_rounds(&subjects, 100.0);

        assert!(out.results.iter().all(|r| (r.rounds - 1.0).abs() < 1e-9));
        assert!((out.unused_hours - 85.0).abs() < 1e-9);
        assert_eq!(out.refinement_passes, 1);
    }

    #[test]
    fn empty_subject_never_spins() {
        let subjects = vec![subject("empty", 0.0, 5, 3), subject("B", 10.0, 1, 2)];
        let out = allocate_target_rounds(&subjects, 50.0);

        assert_eq!(out.results[0].subject_name, "empty");
        assert_eq!(out.results[0].rounds, 0.0);
        assert!((out.results[1].rounds - 2.0).abs() < 1e-9);
        assert!((out.unused_hours - 30.0).abs() < 1e-6);
    }

    #[test]
    fn negative_budget_gives_zero_everywhere() {
        let subjects = vec![subject("A", 10.0, 3, 2), subject("B", 10.0, 3, 2)];
        let out = allocate_target_rounds(&subjects, -12.0);

        assert!(out.results.iter().all(|r| r.rounds == 0.0));
        assert_eq!(out.unused_hours, 0.0);
    }

    #[test]
    fn nan_budget_credits_nothing() {
        let subjects = vec![subject("A", 10.0, 3, 2), subject("B", 10.0, 3, 2)];
        let out = allocate_target_rounds(&subjects, f64::NAN);

        assert!(out.results.iter().all(|r| r.rounds == 0.0));
        assert_eq!(out.unused_hours, 0.0);
        assert_eq!(out.refinement_passes, 0);
    }

    #[test]
    fn never_overshoots_target() {
        let subjects = vec![subject("A", 3.0, 3, 3), subject("B", 7.0, 2, 4)];
        let out = simulate_target_rounds(&subjects, 1_000.0);
        for r in &out {
            assert!(r.rounds <= f64::from(r.target_rounds) + 1e-9);
            assert!((r.achievement_rate - 100.0).abs() < 1e-6);
        }
    }
}
