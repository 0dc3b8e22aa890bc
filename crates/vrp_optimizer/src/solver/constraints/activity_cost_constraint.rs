use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        insertion_context::InsertionContext,
        score::Score,
        score_level::ScoreLevel,
        solution::{route::WorkingSolutionRoute, utils::ActivitySchedule},
    },
};

use super::activity_constraint::ActivityConstraint;

/// Cost of performing activities: the problem's activity cost policy plus
/// service and waiting time priced by the vehicle type.
#[derive(Clone)]
pub struct ActivityCostConstraint;

const SCORE_LEVEL: ScoreLevel = ScoreLevel::Soft;

impl ActivityConstraint for ActivityCostConstraint {
    fn score_level(&self) -> ScoreLevel {
        SCORE_LEVEL
    }

    fn compute_score(
        &self,
        _problem: &VehicleRoutingProblem,
        _route: &WorkingSolutionRoute,
        activity: &ActivitySchedule,
    ) -> Score {
        Score::of(self.score_level(), activity.cost)
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        let route = context.route();
        let first_position = context.insertion.first_position();

        let old_cost = route.schedules()[first_position..]
            .iter()
            .map(|schedule| schedule.cost)
            .sum::<f64>();
        let new_cost = context
            .simulated_tail()
            .schedules
            .iter()
            .map(|schedule| schedule.cost)
            .sum::<f64>();

        Score::of(self.score_level(), new_cost - old_cost)
    }
}
