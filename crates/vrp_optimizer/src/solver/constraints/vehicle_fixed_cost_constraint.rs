use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        insertion_context::InsertionContext, score::Score, score_level::ScoreLevel,
        solution::route::WorkingSolutionRoute,
    },
};

use super::route_constraint::RouteConstraint;

/// Fixed cost paid once for every vehicle that leaves its depot.
#[derive(Clone)]
pub struct VehicleFixedCostConstraint;

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Soft;

impl RouteConstraint for VehicleFixedCostConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(
        &self,
        problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
    ) -> Score {
        Score::of(self.score_level(), route.fixed_costs(problem))
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        let route = context.route();
        if !route.is_empty() {
            return Score::zero();
        }

        Score::of(
            self.score_level(),
            route.vehicle(context.problem).vehicle_type().fixed_cost(),
        )
    }
}
