use rand::rngs::SmallRng;

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        cost_evaluator::CostEvaluator, insertion::Insertion, noise::NoiseGenerator, score::Score,
        solution::working_solution::WorkingSolution,
    },
};

pub struct RecreateContext<'a> {
    pub rng: &'a mut SmallRng,
    pub evaluator: &'a CostEvaluator,
    pub problem: &'a VehicleRoutingProblem,
    pub noise_generator: Option<&'a NoiseGenerator>,
    pub thread_pool: &'a rayon::ThreadPool,
}

impl<'a> RecreateContext<'a> {
    /// Insertion score perturbed by the noise generator, when one is set.
    pub fn compute_noisy_insertion_score(
        &mut self,
        solution: &WorkingSolution,
        insertion: &Insertion,
    ) -> Score {
        let score = self.evaluator.insertion_score(solution, insertion);
        match self.noise_generator {
            Some(noise_generator) => noise_generator.apply_noise(score, self.rng),
            None => score,
        }
    }

    pub fn should_insert(&self, score: &Score) -> bool {
        !score.is_failure()
    }
}
