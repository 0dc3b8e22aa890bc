use std::f64::consts::LN_2;

use crate::solver::score::Score;

use super::accept_solution::{AcceptSolution, AcceptSolutionContext};

/// Threshold acceptance: a candidate is accepted when its cost is below the
/// current cost plus a threshold that halves every `alpha` of the search.
///
/// Record-to-record travel as described in "Record breaking optimization
/// results using the ruin and recreate principle" (Schrimpf et al.).
pub struct SchrimpfAcceptor {
    initial_threshold: f64,
    alpha: f64,
}

impl SchrimpfAcceptor {
    pub fn new(initial_threshold: f64, alpha: f64) -> Self {
        SchrimpfAcceptor {
            initial_threshold,
            alpha: alpha.max(f64::EPSILON),
        }
    }

    pub fn threshold(&self, progress: f64) -> f64 {
        self.initial_threshold * (-LN_2 * progress.clamp(0.0, 1.0) / self.alpha).exp()
    }
}

impl AcceptSolution for SchrimpfAcceptor {
    fn accept(&self, current: &Score, candidate: &Score, context: AcceptSolutionContext) -> bool {
        if candidate <= current {
            return true;
        }

        if candidate.hard_score > current.hard_score {
            return false;
        }

        candidate.soft_score < current.soft_score + self.threshold(context.progress)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;

    #[test]
    fn test_threshold_halves_every_alpha() {
        let acceptor = SchrimpfAcceptor::new(8.0, 0.25);

        assert!((acceptor.threshold(0.0) - 8.0).abs() < 1e-9);
        assert!((acceptor.threshold(0.25) - 4.0).abs() < 1e-9);
        assert!((acceptor.threshold(0.5) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_accepts_within_threshold() {
        let acceptor = SchrimpfAcceptor::new(2.0, 0.5);
        let mut rng = SmallRng::seed_from_u64(0);

        assert!(acceptor.accept(
            &Score::soft(10.0),
            &Score::soft(11.5),
            AcceptSolutionContext {
                iteration: 0,
                progress: 0.0,
                rng: &mut rng,
            },
        ));
        assert!(!acceptor.accept(
            &Score::soft(10.0),
            &Score::soft(11.5),
            AcceptSolutionContext {
                iteration: 50,
                progress: 0.5,
                rng: &mut rng,
            },
        ));
    }
}
