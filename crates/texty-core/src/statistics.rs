//! Aggregate review statistics.

use serde::{Deserialize, Serialize};

use crate::problem_set::ProblemSet;

/// Totals summed across every problem set in a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub total_right: u64,
    pub total_wrong: u64,
    pub total_attempts: u64,
}

impl AggregateStats {
    /// Sum the tallies of `sets`.
    pub fn compute<'a>(sets: impl IntoIterator<Item = &'a ProblemSet>) -> Self {
        let (total_right, total_wrong) = sets.into_iter().fold((0u64, 0u64), |(r, w), ps| {
            (r + u64::from(ps.right_count), w + u64::from(ps.wrong_count))
        });
        Self {
            total_right,
            total_wrong,
            total_attempts: total_right + total_wrong,
        }
    }

    /// Share of attempts answered correctly, as a percentage.
    ///
    /// `None` when nothing has been attempted yet.
    pub fn percent_right(&self) -> Option<f64> {
        if self.total_attempts == 0 {
            return None;
        }
        Some(self.total_right as f64 / self.total_attempts as f64 * 100.0)
    }
}
