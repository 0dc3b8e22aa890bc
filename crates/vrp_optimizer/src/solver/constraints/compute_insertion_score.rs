use crate::solver::{insertion_context::InsertionContext, score::Score, score_level::ScoreLevel};

use super::constraint::Constraint;

/// Hard constraints run first and the evaluation stops at the first failure;
/// soft constraints are only summed for feasible candidates.
pub fn compute_insertion_score(constraints: &[Constraint], context: &InsertionContext) -> Score {
    let mut score = Score::zero();

    for constraint in constraints
        .iter()
        .filter(|c| c.score_level() == ScoreLevel::Hard)
    {
        score += constraint.compute_insertion_score(context);

        if score.is_failure() {
            return score;
        }
    }

    for constraint in constraints
        .iter()
        .filter(|c| c.score_level() == ScoreLevel::Soft)
    {
        score += constraint.compute_insertion_score(context);
    }

    score
}
