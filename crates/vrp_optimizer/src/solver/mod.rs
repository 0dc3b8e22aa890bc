pub mod accepted_solution;
pub mod constraints;
pub mod construction;
pub mod cost_evaluator;
pub mod insertion;
pub mod insertion_context;
pub mod noise;
pub mod recreate;
pub mod ruin;
pub mod score;
pub mod score_level;
pub mod search;
pub mod solution;
pub mod solution_pool;
#[allow(clippy::module_inception)]
pub mod solver;
pub mod solver_params;
pub mod strategy_weights;
