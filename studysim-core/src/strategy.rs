//! Strategy names and their allocators.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::allocation::{Allocator, EqualDistribution, PriorityDistribution};
use crate::model::Subject;
use crate::target_rounds::{TargetRoundsDistribution, priority_order};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Equal,
    Priority,
    TargetRounds,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Equal, Strategy::Priority, Strategy::TargetRounds];

    /// Resolve a strategy name. Unknown names fall back to `Equal`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "equal" => Strategy::Equal,
            "priority" => Strategy::Priority,
            "target-rounds" | "target_rounds" | "rounds" => Strategy::TargetRounds,
            other => {
                warn!(strategy = other, "unknown strategy, using equal distribution");
                Strategy::Equal
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Equal => "equal",
            Strategy::Priority => "priority",
            Strategy::TargetRounds => "target-rounds",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Equal => "Same time for every subject",
            Strategy::Priority => "Time weighted by subject priority",
            Strategy::TargetRounds => "Optimized toward each subject's target rounds",
        }
    }

    pub fn allocator(&self) -> &'static dyn Allocator {
        match self {
            Strategy::Equal => &EqualDistribution,
            Strategy::Priority => &PriorityDistribution,
            Strategy::TargetRounds => &TargetRoundsDistribution,
        }
    }

    /// Subjects in the order this strategy emits its results, so result `i`
    /// belongs to subject `i` even when names repeat.
    pub fn output_order<'a>(&self, subjects: &'a [Subject]) -> Vec<&'a Subject> {
        match self {
            Strategy::Equal | Strategy::Priority => subjects.iter().collect(),
            Strategy::TargetRounds => priority_order(subjects),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
