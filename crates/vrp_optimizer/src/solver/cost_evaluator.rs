use fxhash::FxHashMap;

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::{
        constraints::{
            activity_constraint::{ActivityConstraint, ActivityConstraintType},
            activity_cost_constraint::ActivityCostConstraint,
            capacity_constraint::CapacityConstraint,
            compute_insertion_score::compute_insertion_score,
            constraint::Constraint,
            global_constraint::GlobalConstraintType,
            route_constraint::{RouteConstraint, RouteConstraintType},
            shift_constraint::ShiftConstraint,
            time_window_constraint::TimeWindowConstraint,
            transport_cost_constraint::TransportCostConstraint,
            unassigned_job_constraint::UnassignedJobConstraint,
            vehicle_fixed_cost_constraint::VehicleFixedCostConstraint,
        },
        insertion::Insertion,
        insertion_context::InsertionContext,
        score::{Score, ScoreAnalysis},
        solution::{route::WorkingSolutionRoute, working_solution::WorkingSolution},
    },
};

/// Scores insertions, routes and whole solutions against the constraint set.
/// Pure: the same input always yields the same score.
#[derive(Clone)]
pub struct CostEvaluator {
    constraints: Vec<Constraint>,
}

impl CostEvaluator {
    pub fn new(unassigned_job_penalty: f64) -> Self {
        CostEvaluator {
            constraints: vec![
                Constraint::Route(RouteConstraintType::Capacity(CapacityConstraint::default())),
                Constraint::Route(RouteConstraintType::Shift(ShiftConstraint)),
                Constraint::Activity(ActivityConstraintType::TimeWindow(
                    TimeWindowConstraint::default(),
                )),
                Constraint::Route(RouteConstraintType::TransportCost(TransportCostConstraint)),
                Constraint::Activity(ActivityConstraintType::ActivityCost(ActivityCostConstraint)),
                Constraint::Route(RouteConstraintType::VehicleFixedCost(
                    VehicleFixedCostConstraint,
                )),
                Constraint::Global(GlobalConstraintType::UnassignedJob(
                    UnassignedJobConstraint::new(unassigned_job_penalty),
                )),
            ],
        }
    }

    /// Marginal score of applying `insertion` to `solution`. A failing score
    /// marks an infeasible candidate.
    pub fn insertion_score(&self, solution: &WorkingSolution, insertion: &Insertion) -> Score {
        let context = InsertionContext::new(solution.problem(), solution, insertion);
        compute_insertion_score(&self.constraints, &context)
    }

    pub fn route_score(
        &self,
        problem: &VehicleRoutingProblem,
        route: &WorkingSolutionRoute,
    ) -> Score {
        if route.is_empty() {
            return Score::zero();
        }

        self.constraints
            .iter()
            .map(|constraint| match constraint {
                Constraint::Route(constraint) => constraint.compute_score(problem, route),
                Constraint::Activity(constraint) => route
                    .schedules()
                    .iter()
                    .map(|schedule| constraint.compute_score(problem, route, schedule))
                    .sum(),
                Constraint::Global(_) => Score::zero(),
            })
            .sum()
    }

    pub fn solution_score(&self, solution: &WorkingSolution) -> Score {
        let problem = solution.problem();
        self.constraints
            .iter()
            .map(|constraint| constraint.compute_score(problem, solution))
            .sum()
    }

    pub fn score_analysis(&self, solution: &WorkingSolution) -> ScoreAnalysis {
        let problem = solution.problem();
        let mut scores = FxHashMap::default();

        for constraint in &self.constraints {
            *scores
                .entry(constraint.constraint_name())
                .or_insert(Score::zero()) += constraint.compute_score(problem, solution);
        }

        ScoreAnalysis { scores }
    }
}
