use jiff::SignedDuration;
use serde::{Deserialize, Serialize};

use crate::{
    acceptor::solution_acceptor::SolverAcceptorStrategy,
    problem::fleet::FleetSize,
    solver::{
        recreate::{best_insertion::BestInsertionSortStrategy, recreate_strategy::RecreateStrategy},
        ruin::{ruin_params::RuinParams, ruin_strategy::RuinStrategy},
    },
};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverParams {
    /// Ruin-and-recreate iterations, split across the search threads.
    pub max_iterations: usize,
    pub max_duration: Option<SignedDuration>,

    /// Overrides the fleet size declared by the problem.
    pub fleet_size: Option<FleetSize>,
    pub pool_capacity: usize,

    pub ruin_strategy_weights: Vec<(RuinStrategy, f64)>,
    pub ruin: RuinParams,
    pub recreate_strategy_weights: Vec<(RecreateStrategy, f64)>,

    pub acceptor: SolverAcceptorStrategy,
    /// Initial temperature of simulated annealing, initial threshold of the
    /// Schrimpf acceptor.
    pub acceptance_temperature: f64,
    pub schrimpf_alpha: f64,

    pub unassigned_job_penalty: f64,

    pub seed: u64,
    pub search_threads: Threads,
    pub insertion_threads: Threads,
    /// Every `sync_interval` iterations a search thread adopts the best pooled
    /// solution when it beats its own. Zero disables it.
    pub sync_interval: usize,

    pub noise_probability: f64,
    pub noise_level: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threads {
    Single,
    Auto,
    Multi(usize),
}

impl Threads {
    pub fn number_of_threads(&self) -> usize {
        match self {
            Threads::Single => 1,
            Threads::Multi(num) => (*num).max(1),
            Threads::Auto => std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            max_duration: None,
            fleet_size: None,
            pool_capacity: 10,
            ruin_strategy_weights: vec![
                (RuinStrategy::Random, 1.0),
                (RuinStrategy::Radial, 1.0),
                (RuinStrategy::String, 1.0),
            ],
            ruin: RuinParams::default(),
            recreate_strategy_weights: vec![
                (RecreateStrategy::CheapestInsertion, 1.0),
                (
                    RecreateStrategy::BestInsertion(BestInsertionSortStrategy::Random),
                    2.0,
                ),
                (
                    RecreateStrategy::BestInsertion(BestInsertionSortStrategy::Demand),
                    0.5,
                ),
                (
                    RecreateStrategy::BestInsertion(BestInsertionSortStrategy::Far),
                    0.5,
                ),
            ],
            acceptor: SolverAcceptorStrategy::Schrimpf,
            acceptance_temperature: 10.0,
            schrimpf_alpha: 0.1,
            unassigned_job_penalty: 10_000.0,
            seed: 2427121,
            search_threads: Threads::Single,
            insertion_threads: Threads::Multi(4),
            sync_interval: 250,
            noise_probability: 0.15,
            noise_level: 0.025,
        }
    }
}
