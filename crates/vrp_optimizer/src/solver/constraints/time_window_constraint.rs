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

/// Activities start no later than the end of their time window. Arriving
/// early means waiting, which the schedule already accounts for.
#[derive(Clone)]
pub struct TimeWindowConstraint {
    score_level: ScoreLevel,
}

impl Default for TimeWindowConstraint {
    fn default() -> Self {
        TimeWindowConstraint {
            score_level: ScoreLevel::Hard,
        }
    }
}

impl TimeWindowConstraint {
    pub fn new(score_level: ScoreLevel) -> Self {
        TimeWindowConstraint { score_level }
    }
}

impl ActivityConstraint for TimeWindowConstraint {
    fn score_level(&self) -> ScoreLevel {
        self.score_level
    }

    fn compute_score(
        &self,
        problem: &VehicleRoutingProblem,
        _route: &WorkingSolutionRoute,
        activity: &ActivitySchedule,
    ) -> Score {
        Score::of(self.score_level, activity.overtime(problem))
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        let problem = context.problem();
        if !problem.has_time_windows() {
            return Score::zero();
        }

        let overtime = context
            .simulated_tail()
            .schedules
            .iter()
            .map(|schedule| schedule.overtime(problem))
            .sum();

        Score::of(self.score_level, overtime)
    }
}
