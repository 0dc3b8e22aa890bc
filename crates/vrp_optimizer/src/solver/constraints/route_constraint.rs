use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        insertion_context::InsertionContext, score::Score, score_level::ScoreLevel,
        solution::route::WorkingSolutionRoute,
    },
};

use super::{
    capacity_constraint::CapacityConstraint, shift_constraint::ShiftConstraint,
    transport_cost_constraint::TransportCostConstraint,
    vehicle_fixed_cost_constraint::VehicleFixedCostConstraint,
};

pub trait RouteConstraint {
    fn score_level(&self) -> ScoreLevel;

    fn compute_score(&self, problem: &VehicleRoutingProblem, route: &WorkingSolutionRoute)
    -> Score;
    fn compute_insertion_score(&self, context: &InsertionContext) -> Score;
}

#[derive(Clone)]
pub enum RouteConstraintType {
    Capacity(CapacityConstraint),
    Shift(ShiftConstraint),
    TransportCost(TransportCostConstraint),
    VehicleFixedCost(VehicleFixedCostConstraint),
}

impl RouteConstraintType {
    pub fn constraint_name(&self) -> &'static str {
        match self {
            RouteConstraintType::Capacity(_) => "capacity",
            RouteConstraintType::Shift(_) => "shift",
            RouteConstraintType::TransportCost(_) => "transport_cost",
            RouteConstraintType::VehicleFixedCost(_) => "vehicle_fixed_cost",
        }
    }
}

impl RouteConstraint for RouteConstraintType {
    fn score_level(&self) -> ScoreLevel {
        match self {
            RouteConstraintType::Capacity(c) => c.score_level(),
            RouteConstraintType::Shift(c) => c.score_level(),
            RouteConstraintType::TransportCost(c) => c.score_level(),
            RouteConstraintType::VehicleFixedCost(c) => c.score_level(),
        }
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        match self {
            RouteConstraintType::Capacity(c) => c.compute_insertion_score(context),
            RouteConstraintType::Shift(c) => c.compute_insertion_score(context),
            RouteConstraintType::TransportCost(c) => c.compute_insertion_score(context),
            RouteConstraintType::VehicleFixedCost(c) => c.compute_insertion_score(context),
        }
    }

    fn compute_score(
        &self,
        problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
    ) -> Score {
        match self {
            RouteConstraintType::Capacity(c) => c.compute_score(problem, route),
            RouteConstraintType::Shift(c) => c.compute_score(problem, route),
            RouteConstraintType::TransportCost(c) => c.compute_score(problem, route),
            RouteConstraintType::VehicleFixedCost(c) => c.compute_score(problem, route),
        }
    }
}
