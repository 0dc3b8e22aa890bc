use crate::solver::{
    constraints::unassigned_job_constraint::UnassignedJobConstraint,
    insertion_context::InsertionContext, score::Score, score_level::ScoreLevel,
    solution::working_solution::WorkingSolution,
};

pub trait GlobalConstraint {
    fn score_level(&self) -> ScoreLevel;
    fn compute_score(&self, solution: &WorkingSolution) -> Score;
    fn compute_insertion_score(&self, context: &InsertionContext) -> Score;
}

#[derive(Clone)]
pub enum GlobalConstraintType {
    UnassignedJob(UnassignedJobConstraint),
}

impl GlobalConstraintType {
    pub fn constraint_name(&self) -> &'static str {
        match self {
            Self::UnassignedJob(_) => "unassigned_job",
        }
    }
}

impl GlobalConstraint for GlobalConstraintType {
    fn score_level(&self) -> ScoreLevel {
        match self {
            Self::UnassignedJob(constraint) => constraint.score_level(),
        }
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        match self {
            Self::UnassignedJob(constraint) => constraint.compute_insertion_score(context),
        }
    }

    fn compute_score(&self, solution: &WorkingSolution) -> Score {
        match self {
            Self::UnassignedJob(constraint) => constraint.compute_score(solution),
        }
    }
}
