//! Simulation entry point: plan + subjects + strategy name -> results.

use tracing::debug;

use crate::model::{SimulationResultData, StudyPlan, Subject};
use crate::strategy::Strategy;
use crate::time::{calculate_study_days, calculate_total_study_time};

/// Study days and total hours a plan provides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudyBudget {
    pub study_days: i64,
    pub total_hours: f64,
}

impl StudyBudget {
    pub fn for_plan(plan: &StudyPlan) -> Self {
        let study_days = calculate_study_days(plan.study_start_date, plan.study_end_date);
        Self {
            study_days,
            total_hours: calculate_total_study_time(study_days, plan.daily_study_hours),
        }
    }
}

/// Run the named strategy; unknown names use equal distribution.
pub fn run_simulation(
    plan: &StudyPlan,
    subjects: &[Subject],
    strategy: &str,
) -> Vec<SimulationResultData> {
    run_strategy(plan, subjects, Strategy::from_name(strategy))
}

pub fn run_strategy(
    plan: &StudyPlan,
    subjects: &[Subject],
    strategy: Strategy,
) -> Vec<SimulationResultData> {
    let budget = StudyBudget::for_plan(plan);
    debug!(
        %strategy,
        study_days = budget.study_days,
        total_hours = budget.total_hours,
        subjects = subjects.len(),
        "running simulation"
    );
    strategy.allocator().distribute(subjects, budget.total_hours)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn plan(days: i64, hours: f64) -> StudyPlan {
        let start = Utc.with_ymd_and_hms(2026, 5, 1, 9, 0, 0).unwrap();
        StudyPlan::new("Finals", start, start + Duration::days(days), hours)
    }

    #[test]
    fn budget_multiplies_days_by_hours() {
        let b = StudyBudget::for_plan(&plan(15, 4.0));
        assert_eq!(b.study_days, 15);
        assert_eq!(b.total_hours, 60.0);
    }

    #[test]
    fn dispatches_on_name() {
        let subjects = vec![
            Subject::new("a", "A").with_load(60.0, "pages").with_speed(10.0).with_priority(1),
            Subject::new("b", "B").with_load(60.0, "pages").with_speed(10.0).with_priority(3),
        ];
        let p = plan(10, 4.0);

        let equal = run_simulation(&p, &subjects, "equal");
        assert!((equal[0].rounds - 2.0).abs() < 1e-9);

        let priority = run_simulation(&p, &subjects, "priority");
        assert!((priority[0].rounds - 1.0).abs() < 1e-9);
        assert!((priority[1].rounds - 3.0).abs() < 1e-9);

        let target = run_simulation(&p, &subjects, "target-rounds");
        assert_eq!(target[0].subject_name, "B");
    }

    #[test]
    fn no_subjects_no_results() {
        for s in Strategy::ALL {
            assert!(run_strategy(&plan(10, 4.0), &[], s).is_empty());
        }
    }
}
