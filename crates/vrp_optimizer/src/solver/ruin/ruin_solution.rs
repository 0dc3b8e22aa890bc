use rand::Rng;

use crate::solver::solution::working_solution::WorkingSolution;

use super::ruin_context::RuinContext;

/// Removes jobs from a solution. Removed jobs end up in the unassigned set.
pub trait RuinSolution {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>)
    where
        R: Rng;
}
