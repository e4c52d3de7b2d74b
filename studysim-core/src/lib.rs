//! studysim-core: time-allocation engine for exam study planning.
//!
//! Given a study period, a daily hour budget and a list of subjects, works out
//! how many review rounds each subject gets under a chosen strategy. Pure and
//! synchronous; storage and presentation live in `studysim-cli`.

pub mod allocation;
pub mod math;
pub mod model;
pub mod simulation;
pub mod strategy;
pub mod summary;
pub mod target_rounds;
pub mod time;
pub mod validate;
pub mod workload;

pub use allocation::{
    Allocator, EqualDistribution, PriorityDistribution, simulate_equal_distribution,
    simulate_priority_distribution,
};
pub use math::{achievement_rate, safe_divide, usable_budget};
pub use model::{CHART_PALETTE, SimulationResultData, StudyPlan, Subject, chart_color};
pub use simulation::{StudyBudget, run_simulation, run_strategy};
pub use strategy::Strategy;
pub use summary::{SavedSimulation, SimulationSummary};
pub use target_rounds::{
    TargetRoundsAllocation, TargetRoundsDistribution, allocate_target_rounds, priority_order,
    simulate_target_rounds,
};
pub use time::{calculate_study_days, calculate_total_study_time, parse_study_date};
pub use validate::{
    MAX_TARGET_ROUNDS, ValidationError, validate_plan, validate_subject, validate_subjects,
};
pub use workload::calculate_subject_round_time;
