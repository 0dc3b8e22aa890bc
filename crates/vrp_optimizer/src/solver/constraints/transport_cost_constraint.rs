use crate::{
    problem::{
        location::LocationIdx, vehicle::Vehicle, vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        insertion::Insertion,
        insertion_context::InsertionContext,
        score::Score,
        score_level::ScoreLevel,
        solution::{route::WorkingSolutionRoute, utils::leg_cost},
    },
};

use super::route_constraint::RouteConstraint;

#[derive(Clone)]
pub struct TransportCostConstraint;

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Soft;

/// Cost of detouring through `location_id` between `previous` and `next`.
fn detour_cost(
    problem: &VehicleRoutingProblem,
    vehicle: &Vehicle,
    previous: LocationIdx,
    location_id: LocationIdx,
    next: Option<LocationIdx>,
) -> f64 {
    problem.travel_cost(vehicle, previous, location_id) + leg_cost(problem, vehicle, location_id, next)
        - leg_cost(problem, vehicle, previous, next)
}

impl RouteConstraint for TransportCostConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(
        &self,
        _problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
    ) -> Score {
        Score::of(self.score_level(), route.transport_costs())
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        let problem = context.problem();
        let route = context.route();
        let vehicle = route.vehicle(problem);

        let delta = match context.insertion {
            Insertion::Service(insertion) => detour_cost(
                problem,
                vehicle,
                route.previous_location_id(problem, insertion.position),
                problem.task(insertion.activity_id()).location_id(),
                route.next_location_id(problem, insertion.position),
            ),
            Insertion::Shipment(insertion) => {
                let shipment = problem.shipment(insertion.job_index);
                let (Some(pickup), Some(delivery)) = (
                    shipment.map(|shipment| shipment.pickup().location_id()),
                    shipment.map(|shipment| shipment.delivery().location_id()),
                ) else {
                    return Score::zero();
                };

                let previous = route.previous_location_id(problem, insertion.pickup_position);

                if insertion.pickup_position == insertion.delivery_position {
                    let next = route.next_location_id(problem, insertion.pickup_position);
                    problem.travel_cost(vehicle, previous, pickup)
                        + problem.travel_cost(vehicle, pickup, delivery)
                        + leg_cost(problem, vehicle, delivery, next)
                        - leg_cost(problem, vehicle, previous, next)
                } else {
                    detour_cost(
                        problem,
                        vehicle,
                        previous,
                        pickup,
                        route.next_location_id(problem, insertion.pickup_position),
                    ) + detour_cost(
                        problem,
                        vehicle,
                        route.previous_location_id(problem, insertion.delivery_position),
                        delivery,
                        route.next_location_id(problem, insertion.delivery_position),
                    )
                }
            }
        };

        Score::of(self.score_level(), delta)
    }
}
