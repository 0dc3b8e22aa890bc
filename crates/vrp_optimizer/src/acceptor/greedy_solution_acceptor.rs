use crate::solver::score::Score;

use super::accept_solution::{AcceptSolution, AcceptSolutionContext};

/// Accepts candidates that are not worse than the current solution.
pub struct GreedySolutionAcceptor;

impl AcceptSolution for GreedySolutionAcceptor {
    fn accept(&self, current: &Score, candidate: &Score, _: AcceptSolutionContext) -> bool {
        candidate <= current
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;

    #[test]
    fn test_greedy_accepts_equal_and_better() {
        let mut rng = SmallRng::seed_from_u64(0);
        let acceptor = GreedySolutionAcceptor;

        let mut accept = |current: Score, candidate: Score| {
            acceptor.accept(
                &current,
                &candidate,
                AcceptSolutionContext {
                    iteration: 1,
                    progress: 0.5,
                    rng: &mut rng,
                },
            )
        };

        assert!(accept(Score::soft(10.0), Score::soft(9.0)));
        assert!(accept(Score::soft(10.0), Score::soft(10.0)));
        assert!(!accept(Score::soft(10.0), Score::soft(10.5)));
        assert!(!accept(Score::soft(10.0), Score::new(1.0, 0.0)));
    }
}
