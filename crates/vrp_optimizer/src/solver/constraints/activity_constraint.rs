use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        insertion_context::InsertionContext,
        score::Score,
        score_level::ScoreLevel,
        solution::{route::WorkingSolutionRoute, utils::ActivitySchedule},
    },
};

use super::{
    activity_cost_constraint::ActivityCostConstraint,
    time_window_constraint::TimeWindowConstraint,
};

pub trait ActivityConstraint {
    fn score_level(&self) -> ScoreLevel;

    fn compute_score(
        &self,
        problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
        activity: &ActivitySchedule,
    ) -> Score;

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score;
}

#[derive(Clone)]
pub enum ActivityConstraintType {
    TimeWindow(TimeWindowConstraint),
    ActivityCost(ActivityCostConstraint),
}

impl ActivityConstraintType {
    pub fn constraint_name(&self) -> &'static str {
        match self {
            ActivityConstraintType::TimeWindow(_) => "time_window",
            ActivityConstraintType::ActivityCost(_) => "activity_cost",
        }
    }
}

impl ActivityConstraint for ActivityConstraintType {
    fn score_level(&self) -> ScoreLevel {
        match self {
            ActivityConstraintType::TimeWindow(c) => c.score_level(),
            ActivityConstraintType::ActivityCost(c) => c.score_level(),
        }
    }

    fn compute_score(
        &self,
        problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
        activity: &ActivitySchedule,
    ) -> Score {
        match self {
            ActivityConstraintType::TimeWindow(c) => c.compute_score(problem, route, activity),
            ActivityConstraintType::ActivityCost(c) => c.compute_score(problem, route, activity),
        }
    }

    fn compute_insertion_score(&self, context: &InsertionContext) -> Score {
        match self {
            ActivityConstraintType::TimeWindow(c) => c.compute_insertion_score(context),
            ActivityConstraintType::ActivityCost(c) => c.compute_insertion_score(context),
        }
    }
}
