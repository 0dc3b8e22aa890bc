use rand::Rng;

use crate::solver::score::Score;

use super::accept_solution::{AcceptSolution, AcceptSolutionContext};

/// Accepts a worse candidate with probability `exp(-delta / T)`, where the
/// temperature decreases linearly to zero over the search.
pub struct SimulatedAnnealingAcceptor {
    initial_temperature: f64,
}

impl SimulatedAnnealingAcceptor {
    pub fn new(initial_temperature: f64) -> Self {
        SimulatedAnnealingAcceptor {
            initial_temperature,
        }
    }

    pub fn temperature(&self, progress: f64) -> f64 {
        self.initial_temperature * (1.0 - progress.clamp(0.0, 1.0))
    }
}

impl AcceptSolution for SimulatedAnnealingAcceptor {
    fn accept(&self, current: &Score, candidate: &Score, context: AcceptSolutionContext) -> bool {
        if candidate <= current {
            return true;
        }

        if candidate.hard_score > current.hard_score {
            return false;
        }

        let temperature = self.temperature(context.progress);
        if temperature <= 0.0 {
            return false;
        }

        let delta = candidate.soft_score - current.soft_score;
        context.rng.random::<f64>() < (-delta / temperature).exp()
    }
}
