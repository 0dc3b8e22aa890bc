use crate::solver::solution::working_solution::WorkingSolution;

use super::{ruin_context::RuinContext, ruin_solution::RuinSolution};

pub struct RuinRandom;

impl RuinSolution for RuinRandom {
    fn ruin_solution<R>(
        &self,
        solution: &mut WorkingSolution,
        RuinContext {
            rng,
            num_jobs_to_remove,
            ..
        }: RuinContext<R>,
    ) where
        R: rand::Rng,
    {
        for _ in 0..num_jobs_to_remove {
            let Some(job_id) = solution.random_assigned_job(rng) else {
                break;
            };

            solution.remove_job(job_id);
        }
    }
}
