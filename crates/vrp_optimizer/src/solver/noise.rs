use rand::Rng;

use crate::{problem::vehicle_routing_problem::VehicleRoutingProblem, solver::score::Score};

/// Random perturbation of insertion costs, scaled by the largest depot
/// distance of the problem.
#[derive(Clone, Debug)]
pub struct NoiseGenerator {
    pub noise_probability: f64,
    pub noise_level: f64,
    pub max_cost: f64,
}

impl NoiseGenerator {
    pub fn new(problem: &VehicleRoutingProblem, noise_probability: f64, noise_level: f64) -> Self {
        let max_cost = problem
            .locations()
            .iter()
            .enumerate()
            .map(|(index, _)| problem.average_cost_from_depot(index.into()))
            .fold(0.0, f64::max);

        NoiseGenerator {
            noise_probability: noise_probability.clamp(0.0, 1.0),
            noise_level,
            max_cost,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.noise_probability > 0.0 && self.noise_level > 0.0 && self.max_cost > 0.0
    }

    pub fn create_noise<R: Rng>(&self, rng: &mut R) -> f64 {
        if rng.random_bool(self.noise_probability) {
            self.noise_level * self.max_cost * rng.random_range(-1.0..=1.0)
        } else {
            0.0
        }
    }

    /// Adds noise to the soft part of a feasible score. Infeasible scores are
    /// left untouched.
    pub fn apply_noise<R: Rng>(&self, score: Score, rng: &mut R) -> Score {
        if score.is_failure() || !self.is_enabled() {
            return score;
        }

        score + Score::soft(self.create_noise(rng))
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use crate::test_utils;

    use super::*;

    #[test]
    fn test_noise_is_bounded_and_skips_failures() {
        let problem = test_utils::create_test_problem(
            test_utils::create_location_grid(3, 3),
            test_utils::create_basic_services(vec![4, 8]),
            test_utils::create_basic_vehicles(vec![0]),
        );
        let noise = NoiseGenerator::new(&problem, 1.0, 0.1);
        let mut rng = SmallRng::seed_from_u64(7);

        assert!(noise.max_cost > 0.0);
        for _ in 0..100 {
            let score = noise.apply_noise(Score::soft(10.0), &mut rng);
            assert!((score.soft_score - 10.0).abs() <= 0.1 * noise.max_cost);
        }

        assert_eq!(
            noise.apply_noise(Score::INFEASIBLE, &mut rng),
            Score::INFEASIBLE
        );
    }

    #[test]
    fn test_disabled_noise_keeps_score() {
        let problem = test_utils::create_test_problem(
            test_utils::create_location_grid(2, 2),
            test_utils::create_basic_services(vec![3]),
            test_utils::create_basic_vehicles(vec![0]),
        );
        let noise = NoiseGenerator::new(&problem, 0.0, 0.5);
        let mut rng = SmallRng::seed_from_u64(1);

        assert_eq!(noise.apply_noise(Score::soft(3.0), &mut rng), Score::soft(3.0));
    }
}
