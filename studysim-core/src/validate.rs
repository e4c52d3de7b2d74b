//! Input checks the front end runs before simulating.
//!
//! The engine itself tolerates bad numbers (see [`crate::math::safe_divide`]);
//! these rules exist so users get a message instead of a plan full of zeros.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::{StudyPlan, Subject};

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;

/// Upper bound on review passes; keeps top-up refinement bounded.
pub const MAX_TARGET_ROUNDS: u32 = 100;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("exam name is required")]
    MissingExamName,

    #[error("study end date must be after the start date")]
    EndNotAfterStart,

    #[error("daily study hours must be a positive number (got {0})")]
    InvalidDailyHours(f64),

    #[error("add at least one subject")]
    NoSubjects,

    #[error("subject {id}: name is required")]
    MissingSubjectName { id: String },

    #[error("subject '{name}': total load must be greater than 0")]
    EmptyLoad { name: String },

    #[error("subject '{name}': priority must be between 1 and 5 (got {priority})")]
    PriorityOutOfRange { name: String, priority: u8 },

    #[error("subject '{name}': study speed must be a non-negative number of minutes")]
    InvalidSpeed { name: String },

    #[error("subject '{name}': target rounds must be at least 1")]
    NoTargetRounds { name: String },

    #[error("subject '{name}': target rounds must be at most {max} (got {target})")]
    TooManyTargetRounds { name: String, target: u32, max: u32 },

    #[error("duplicate subject id: {0}")]
    DuplicateId(String),
}

pub fn validate_plan(plan: &StudyPlan) -> Result<(), ValidationError> {
    if plan.exam_name.trim().is_empty() {
        return Err(ValidationError::MissingExamName);
    }
    if plan.study_end_date <= plan.study_start_date {
        return Err(ValidationError::EndNotAfterStart);
    }
    if !(plan.daily_study_hours.is_finite() && plan.daily_study_hours > 0.0) {
        return Err(ValidationError::InvalidDailyHours(plan.daily_study_hours));
    }
    Ok(())
}

pub fn validate_subject(subject: &Subject) -> Result<(), ValidationError> {
    let name = subject.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingSubjectName {
            id: subject.id.clone(),
        });
    }
    if !(subject.total_load.is_finite() && subject.total_load > 0.0) {
        return Err(ValidationError::EmptyLoad { name: name.into() });
    }
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&subject.priority) {
        return Err(ValidationError::PriorityOutOfRange {
            name: name.into(),
            priority: subject.priority,
        });
    }
    if !(subject.study_speed_per_page.is_finite() && subject.study_speed_per_page >= 0.0) {
        return Err(ValidationError::InvalidSpeed { name: name.into() });
    }
    if subject.target_rounds == 0 {
        return Err(ValidationError::NoTargetRounds { name: name.into() });
    }
    if subject.target_rounds > MAX_TARGET_ROUNDS {
        return Err(ValidationError::TooManyTargetRounds {
            name: name.into(),
            target: subject.target_rounds,
            max: MAX_TARGET_ROUNDS,
        });
    }
    Ok(())
}

pub fn validate_subjects(subjects: &[Subject]) -> Result<(), ValidationError> {
    if subjects.is_empty() {
        return Err(ValidationError::NoSubjects);
    }
    let mut seen = HashSet::new();
    for s in subjects {
        validate_subject(s)?;
        if !seen.insert(s.id.as_str()) {
            return Err(ValidationError::DuplicateId(s.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn plan() -> StudyPlan {
        let start = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        StudyPlan::new("Bar exam", start, start + Duration::days(60), 6.0)
    }

    fn subject(id: &str) -> Subject {
        Subject::new(id, format!("Subject {id}")).with_load(200.0, "pages")
    }

    #[test]
    fn accepts_valid_plan() {
        assert_eq!(validate_plan(&plan()), Ok(()));
    }

    #[test]
    fn rejects_blank_exam_name() {
        let mut p = plan();
        p.exam_name = "   ".into();
        assert_eq!(validate_plan(&p), Err(ValidationError::MissingExamName));
    }

    #[test]
    fn rejects_same_day_end() {
        let mut p = plan();
        p.study_end_date = p.study_start_date;
        assert_eq!(validate_plan(&p), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn rejects_non_positive_hours() {
        let mut p = plan();
        p.daily_study_hours = 0.0;
        assert!(matches!(
            validate_plan(&p),
            Err(ValidationError::InvalidDailyHours(_))
        ));
        p.daily_study_hours = f64::NAN;
        assert!(validate_plan(&p).is_err());
    }

    #[test]
    fn subject_rules() {
        assert_eq!(validate_subject(&subject("1")), Ok(()));

        let unnamed = Subject::new("9", " ").with_load(10.0, "pages");
        assert!(matches!(
            validate_subject(&unnamed),
            Err(ValidationError::MissingSubjectName { .. })
        ));

        let empty = Subject::new("2", "Law");
        assert!(matches!(
            validate_subject(&empty),
            Err(ValidationError::EmptyLoad { .. })
        ));

        let loud = subject("3").with_priority(6);
        assert_eq!(
            validate_subject(&loud),
            Err(ValidationError::PriorityOutOfRange {
                name: "Subject 3".into(),
                priority: 6
            })
        );

        let aimless = subject("4").with_target_rounds(0);
        assert!(matches!(
            validate_subject(&aimless),
            Err(ValidationError::NoTargetRounds { .. })
        ));
    }

    #[test]
    fn target_rounds_are_capped() {
        assert_eq!(
            validate_subject(&subject("5").with_target_rounds(MAX_TARGET_ROUNDS)),
            Ok(())
        );
        assert_eq!(
            validate_subject(&subject("5").with_target_rounds(u32::MAX)),
            Err(ValidationError::TooManyTargetRounds {
                name: "Subject 5".into(),
                target: u32::MAX,
                max: MAX_TARGET_ROUNDS,
            })
        );
    }

    #[test]
    fn list_rules() {
        assert_eq!(validate_subjects(&[]), Err(ValidationError::NoSubjects));
        assert_eq!(
            validate_subjects(&[subject("1"), subject("1")]),
            Err(ValidationError::DuplicateId("1".into()))
        );
        assert_eq!(validate_subjects(&[subject("1"), subject("2")]), Ok(()));
    }

    #[test]
    fn messages_read_well() {
        let err = ValidationError::PriorityOutOfRange {
            name: "Law".into(),
            priority: 0,
        };
        assert_eq!(
            err.to_string(),
            "subject 'Law': priority must be between 1 and 5 (got 0)"
        );
    }
}
