use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        insertion_context::InsertionContext, score::Score, score_level::ScoreLevel,
        solution::route::WorkingSolutionRoute,
    },
};

use super::route_constraint::RouteConstraint;

/// Vehicles are back at their end location before their latest end.
#[derive(Clone)]
pub struct ShiftConstraint;

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Hard;

fn shift_overtime(latest_end: Option<f64>, end_arrival_time: f64) -> f64 {
    latest_end.map_or(0.0, |latest_end| (end_arrival_time - latest_end).max(0.0))
}

impl RouteConstraint for ShiftConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(
        &self,
        problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
    ) -> Score {
        Score::of(
            self.score_level(),
            shift_overtime(
                route.vehicle(problem).latest_end(),
                route.end_arrival_time(),
            ),
        )
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        let latest_end = context.route().vehicle(context.problem).latest_end();
        if latest_end.is_none() {
            return Score::zero();
        }

        Score::of(
            self.score_level(),
            shift_overtime(latest_end, context.simulated_tail().end_arrival_time),
        )
    }
}
