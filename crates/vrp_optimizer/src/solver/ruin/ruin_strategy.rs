use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::solver::solution::working_solution::WorkingSolution;

use super::{
    ruin_context::RuinContext, ruin_radial::RuinRadial, ruin_random::RuinRandom,
    ruin_solution::RuinSolution, ruin_string::RuinString,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuinStrategy {
    Random,
    Radial,
    String,
}

impl Display for RuinStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "Random"),
            Self::Radial => write!(f, "Radial"),
            Self::String => write!(f, "String"),
        }
    }
}

impl RuinSolution for RuinStrategy {
    fn ruin_solution<R>(&self, solution: &mut WorkingSolution, context: RuinContext<R>)
    where
        R: rand::Rng,
    {
        match self {
            RuinStrategy::Random => RuinRandom.ruin_solution(solution, context),
            RuinStrategy::Radial => RuinRadial.ruin_solution(solution, context),
            RuinStrategy::String => RuinString.ruin_solution(solution, context),
        }

        solution.compact_routes();
    }
}
