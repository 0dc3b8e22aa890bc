use rand::rngs::SmallRng;

use crate::solver::score::Score;

pub struct AcceptSolutionContext<'a> {
    pub iteration: usize,
    /// Share of the search budget already consumed, in `[0, 1]`.
    pub progress: f64,
    pub rng: &'a mut SmallRng,
}

pub trait AcceptSolution {
    /// Whether a candidate scored `candidate` replaces the current solution
    /// scored `current`.
    fn accept(&self, current: &Score, candidate: &Score, context: AcceptSolutionContext) -> bool;
}
