use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::solver::solution::working_solution::WorkingSolution;

use super::{
    best_insertion::{BestInsertion, BestInsertionParams, BestInsertionSortStrategy},
    cheapest_insertion::CheapestInsertion,
    recreate_context::RecreateContext,
    recreate_solution::RecreateSolution,
};

const BLINK_RATE: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecreateStrategy {
    CheapestInsertion,
    BestInsertion(BestInsertionSortStrategy),
}

impl Display for RecreateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheapestInsertion => write!(f, "CheapestInsertion"),
            Self::BestInsertion(sort_strategy) => write!(f, "BestInsertion({sort_strategy})"),
        }
    }
}

impl RecreateSolution for RecreateStrategy {
    fn recreate_solution(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        match self {
            RecreateStrategy::CheapestInsertion => {
                CheapestInsertion.recreate_solution(solution, context);
            }
            RecreateStrategy::BestInsertion(sort_strategy) => {
                let strategy = BestInsertion::new(BestInsertionParams {
                    sort_strategy: *sort_strategy,
                    blink_rate: BLINK_RATE,
                });
                strategy.recreate_solution(solution, context);
            }
        }
    }
}
