use std::fmt::Display;

use rand::{Rng, rngs::SmallRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};

use crate::{
    problem::{
        job::{Job, JobIdx},
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        insertion::{Insertion, for_each_insertion},
        score::Score,
        solution::working_solution::WorkingSolution,
    },
};

use super::{recreate_context::RecreateContext, recreate_solution::RecreateSolution};

/// Sequential insertion: jobs are taken one at a time in the configured order
/// and each goes to its cheapest position at that moment.
pub struct BestInsertion {
    sort_strategy: BestInsertionSortStrategy,
    blink_rate: f64,
}

#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BestInsertionSortStrategy {
    #[default]
    Random,
    Demand,
    Far,
    Close,
}

impl Display for BestInsertionSortStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "Random"),
            Self::Demand => write!(f, "Demand"),
            Self::Far => write!(f, "Far"),
            Self::Close => write!(f, "Close"),
        }
    }
}

pub struct BestInsertionParams {
    pub sort_strategy: BestInsertionSortStrategy,
    pub blink_rate: f64,
}

fn distance_from_depot(problem: &VehicleRoutingProblem, job_id: JobIdx) -> f64 {
    match problem.job(job_id) {
        Job::Service(service) => problem.average_cost_from_depot(service.location_id()),
        Job::Shipment(shipment) => {
            (problem.average_cost_from_depot(shipment.pickup().location_id())
                + problem.average_cost_from_depot(shipment.delivery().location_id()))
                / 2.0
        }
    }
}

impl BestInsertion {
    pub fn new(
        BestInsertionParams {
            sort_strategy,
            blink_rate,
        }: BestInsertionParams,
    ) -> Self {
        BestInsertion {
            sort_strategy,
            blink_rate: blink_rate.clamp(0.0, 1.0),
        }
    }

    pub fn sort_unassigned_jobs(
        &self,
        problem: &VehicleRoutingProblem,
        unassigned_jobs: &mut [JobIdx],
        rng: &mut SmallRng,
    ) {
        match self.sort_strategy {
            BestInsertionSortStrategy::Random => {
                unassigned_jobs.shuffle(rng);
            }
            BestInsertionSortStrategy::Demand => unassigned_jobs.sort_by(|&a, &b| {
                let demand_a = problem.job(a).demand().iter().sum::<f64>();
                let demand_b = problem.job(b).demand().iter().sum::<f64>();

                demand_b.total_cmp(&demand_a)
            }),
            BestInsertionSortStrategy::Far => unassigned_jobs.sort_by(|&a, &b| {
                distance_from_depot(problem, b).total_cmp(&distance_from_depot(problem, a))
            }),
            BestInsertionSortStrategy::Close => unassigned_jobs.sort_by(|&a, &b| {
                distance_from_depot(problem, a).total_cmp(&distance_from_depot(problem, b))
            }),
        }
    }

    fn should_blink(&self, rng: &mut SmallRng) -> bool {
        self.blink_rate > 0.0 && rng.random_bool(self.blink_rate)
    }

    pub fn insert_jobs(
        &self,
        unassigned_jobs: &[JobIdx],
        solution: &mut WorkingSolution,
        mut context: RecreateContext,
    ) {
        for &job_id in unassigned_jobs {
            let mut best_insertion: Option<Insertion> = None;
            let mut best_score = Score::MAX;

            let mut candidates = Vec::new();
            for_each_insertion(solution, job_id, |insertion| candidates.push(insertion));

            for insertion in candidates {
                if self.should_blink(context.rng) {
                    continue;
                }

                let score = context.compute_noisy_insertion_score(solution, &insertion);
                if score < best_score {
                    best_score = score;
                    best_insertion = Some(insertion);
                }
            }

            if context.should_insert(&best_score)
                && let Some(insertion) = best_insertion
            {
                solution.insert(&insertion);
            }
        }
    }
}

impl RecreateSolution for BestInsertion {
    fn recreate_solution(&self, solution: &mut WorkingSolution, context: RecreateContext) {
        let mut unassigned_jobs = solution.sorted_unassigned_jobs();

        self.sort_unassigned_jobs(context.problem, &mut unassigned_jobs, context.rng);

        self.insert_jobs(&unassigned_jobs, solution, context);
    }
}
