//! Plain-text rendering of simulation results.

use studysim_core::{
    SavedSimulation, SimulationResultData, Strategy, StudyBudget, StudyPlan, Subject,
    calculate_subject_round_time, safe_divide,
};

const BAR_WIDTH: usize = 30;

/// One bar per result, scaled to the largest round count.
pub fn render_bars(results: &[SimulationResultData]) -> String {
    let max_rounds = results.iter().map(|r| r.rounds).fold(0.0, f64::max);
    let name_width = results
        .iter()
        .map(|r| r.subject_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut s = String::new();
    for r in results {
        let filled = (safe_divide(r.rounds, max_rounds) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);
        s.push_str(&format!(
            "{:<name_width$}  {}{}  {:.1} rounds ({:.0}% of {})\n",
            r.subject_name,
            "#".repeat(filled),
            ".".repeat(BAR_WIDTH - filled),
            r.rounds,
            r.achievement_rate,
            r.target_rounds,
        ));
    }
    s
}

/// Hours the results account for. Results are paired with subjects by the
/// strategy's output position, so repeated names still count once each.
pub fn hours_used(
    results: &[SimulationResultData],
    subjects: &[Subject],
    strategy: Strategy,
) -> f64 {
    strategy
        .output_order(subjects)
        .into_iter()
        .zip(results)
        .map(|(s, r)| r.rounds * calculate_subject_round_time(s))
        .sum()
}

pub fn render_plan(plan: &StudyPlan) -> String {
    let budget = StudyBudget::for_plan(plan);
    format!(
        "Exam: {}\nPeriod: {} ~ {} ({} days)\nDaily: {} h\nTotal available: {} h\n",
        plan.exam_name,
        plan.study_start_date.format("%Y-%m-%d"),
        plan.study_end_date.format("%Y-%m-%d"),
        budget.study_days,
        plan.daily_study_hours,
        budget.total_hours,
    )
}

pub fn render_subject(s: &Subject) -> String {
    format!(
        "[{}] {} | {} {} x {} min | priority {} | target {} rounds | {:.1} h/round",
        s.id,
        s.name,
        s.total_load,
        s.load_unit,
        s.study_speed_per_page,
        s.priority,
        s.target_rounds,
        calculate_subject_round_time(s),
    )
}

pub fn render_saved(saved: &SavedSimulation) -> String {
    let mut s = format!(
        "Saved {} ({} strategy) for {}\nAverage achievement: {:.1}%\nBest: {}\nWorst: {}\n\n",
        saved.timestamp.format("%Y-%m-%d %H:%M UTC"),
        saved.strategy,
        saved.study_plan.exam_name,
        saved.total_achievement_rate,
        saved.best_subject,
        saved.worst_subject,
    );
    s.push_str(&render_bars(&saved.results));
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, rounds: f64, target: u32) -> SimulationResultData {
        SimulationResultData::new(&Subject::new(name, name).with_target_rounds(target), rounds, 0)
    }

    #[test]
    fn bars_scale_to_the_max() {
        let out = render_bars(&[result("Math", 2.0, 4), result("Law", 1.0, 2)]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Math  ##############################  2.0 rounds (50% of 4)"));
        assert!(lines[1].starts_with("Law   ###############...............  1.0 rounds (50% of 2)"));
    }

    #[test]
    fn all_zero_rounds_render_empty_bars() {
        let out = render_bars(&[result("A", 0.0, 3)]);
        assert!(out.contains(&".".repeat(BAR_WIDTH)));
        assert!(out.contains("0.0 rounds (0% of 3)"));
    }

    #[test]
    fn hours_used_sums_rounds_times_round_time() {
        let subjects = vec![
            Subject::new("1", "A").with_load(60.0, "pages").with_speed(10.0),
            Subject::new("2", "B").with_load(30.0, "pages").with_speed(10.0),
        ];
        let results = vec![result("A", 1.5, 3), result("B", 2.0, 3)];
        assert!((hours_used(&results, &subjects, Strategy::Equal) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn hours_used_counts_duplicate_names_separately() {
        // Same name, different workloads: 10 h and 2 h per round.
        let subjects = vec![
            Subject::new("1", "Law").with_load(60.0, "pages").with_speed(10.0).with_priority(1),
            Subject::new("2", "Law").with_load(12.0, "pages").with_speed(10.0).with_priority(5),
        ];

        let results = studysim_core::simulate_priority_distribution(&subjects, 12.0);
        let used = hours_used(&results, &subjects, Strategy::Priority);
        assert!((used - 12.0).abs() < 1e-9);

        // Target-rounds emits the priority-5 subject first.
        let results = studysim_core::simulate_target_rounds(&subjects, 12.0);
        assert_eq!(results[0].rounds, 1.0);
        let used = hours_used(&results, &subjects, Strategy::TargetRounds);
        assert!((used - 12.0).abs() < 1e-9);
    }
}
