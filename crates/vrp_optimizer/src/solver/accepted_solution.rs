use std::cmp::Ordering;

use serde::Serialize;

use super::{score::Score, solution::working_solution::WorkingSolution};

#[derive(Clone)]
pub struct AcceptedSolution {
    pub solution: WorkingSolution,
    pub score: Score,
}

impl AcceptedSolution {
    pub fn new(solution: WorkingSolution, score: Score) -> Self {
        AcceptedSolution { solution, score }
    }

    pub fn is_feasible(&self) -> bool {
        !self.score.is_failure()
    }

    /// Score first, then fewer vehicles, then better balanced routes.
    pub fn compare(&self, other: &AcceptedSolution) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| {
                self.solution
                    .non_empty_routes_count()
                    .cmp(&other.solution.non_empty_routes_count())
            })
            .then_with(|| {
                self.solution
                    .route_balance()
                    .cmp(&other.solution.route_balance())
            })
    }

    pub fn is_better_than(&self, other: &AcceptedSolution) -> bool {
        self.compare(other) == Ordering::Less
    }

    pub fn summary(&self) -> SolutionSummary {
        SolutionSummary::from(self)
    }
}

/// Read-only view of a solution, for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionSummary {
    pub score: Score,
    pub total_cost: f64,
    pub total_distance: f64,
    pub routes: Vec<RouteSummary>,
    pub unassigned_jobs: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub vehicle: String,
    pub vehicle_type: String,
    pub activities: Vec<String>,
    pub distance: f64,
    pub cost: f64,
    pub end_time: f64,
}

impl From<&AcceptedSolution> for SolutionSummary {
    fn from(accepted: &AcceptedSolution) -> Self {
        let solution = &accepted.solution;
        let problem = solution.problem();

        SolutionSummary {
            score: accepted.score,
            total_cost: solution.total_cost(),
            total_distance: solution.total_distance(),
            routes: solution
                .non_empty_routes_iter()
                .map(|route| {
                    let vehicle = route.vehicle(problem);
                    RouteSummary {
                        vehicle: vehicle.external_id().to_owned(),
                        vehicle_type: vehicle.vehicle_type().type_id().to_owned(),
                        activities: route
                            .activity_ids()
                            .iter()
                            .map(|&activity_id| {
                                problem.job(activity_id.job_id()).external_id().to_owned()
                            })
                            .collect(),
                        distance: route.distance(),
                        cost: route.total_cost(problem),
                        end_time: route.end_arrival_time(),
                    }
                })
                .collect(),
            unassigned_jobs: solution
                .sorted_unassigned_jobs()
                .into_iter()
                .map(|job_id| problem.job(job_id).external_id().to_owned())
                .collect(),
        }
    }
}
