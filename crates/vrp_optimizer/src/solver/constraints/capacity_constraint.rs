use crate::{
    problem::{
        job::{Job, ServiceType},
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        insertion::Insertion, insertion_context::InsertionContext, score::Score,
        score_level::ScoreLevel, solution::route::WorkingSolutionRoute,
    },
};

use super::route_constraint::RouteConstraint;

/// The load on board never exceeds the vehicle capacity, in any dimension and
/// at any point of the route.
#[derive(Clone)]
pub struct CapacityConstraint {
    score_level: ScoreLevel,
}

impl Default for CapacityConstraint {
    fn default() -> Self {
        CapacityConstraint {
            score_level: ScoreLevel::Hard,
        }
    }
}

impl CapacityConstraint {
    pub fn new(score_level: ScoreLevel) -> Self {
        CapacityConstraint { score_level }
    }
}

impl RouteConstraint for CapacityConstraint {
    fn score_level(&self) -> ScoreLevel {
        self.score_level
    }

    fn compute_score(
        &self,
        problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
    ) -> Score {
        let capacity = route.vehicle(problem).capacity();
        let overload = route
            .current_loads()
            .iter()
            .map(|load| capacity.over_capacity_demand(load))
            .sum();

        Score::of(self.score_level, overload)
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        let problem = context.problem();
        let job = problem.job(context.insertion.job_idx());
        let demand = job.demand();
        if demand.is_empty() {
            return Score::zero();
        }

        let route = context.route();

        // Peak of the loads the new job travels with
        let peak = match context.insertion {
            Insertion::Service(insertion) => match job {
                Job::Service(service) if service.service_type() == ServiceType::Delivery => {
                    route.fwd_load_peak(insertion.position).clone()
                }
                _ => route.bwd_load_peak(insertion.position).clone(),
            },
            Insertion::Shipment(insertion) => {
                route.load_peak_between(insertion.pickup_position, insertion.delivery_position)
            }
        };

        let load = &peak + demand;
        let capacity = route.vehicle(problem).capacity();
        if capacity.satisfies_demand(&load) {
            Score::zero()
        } else {
            Score::of(self.score_level, capacity.over_capacity_demand(&load))
        }
    }
}
