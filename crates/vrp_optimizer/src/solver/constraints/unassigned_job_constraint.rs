use crate::solver::{
    insertion_context::InsertionContext, score::Score, score_level::ScoreLevel,
    solution::working_solution::WorkingSolution,
};

use super::global_constraint::GlobalConstraint;

/// Each unassigned job costs a fixed penalty.
#[derive(Clone)]
pub struct UnassignedJobConstraint {
    penalty: f64,
}

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Soft;

impl UnassignedJobConstraint {
    pub fn new(penalty: f64) -> Self {
        UnassignedJobConstraint { penalty }
    }

    pub fn penalty(&self) -> f64 {
        self.penalty
    }
}

impl GlobalConstraint for UnassignedJobConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(&self, solution: &WorkingSolution) -> Score {
        Score::of(
            self.score_level(),
            solution.unassigned_jobs().len() as f64 * self.penalty,
        )
    }

    // Every candidate removes the same penalty, so it does not rank insertions.
    fn compute_insertion_score(&self, _context: &InsertionContext) -> Score {
        Score::zero()
    }
}
