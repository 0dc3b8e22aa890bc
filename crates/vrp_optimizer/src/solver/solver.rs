use std::sync::Arc;

use jiff::Timestamp;
use parking_lot::RwLock;
use serde::Serialize;

use crate::{error::SolverError, problem::vehicle_routing_problem::VehicleRoutingProblem};

use super::{
    accepted_solution::AcceptedSolution, cost_evaluator::CostEvaluator, search::Search,
    solution::working_solution::InitialRoute, solver_params::SolverParams,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

/// Entry point of the engine: owns the search, runs it and exposes the
/// retained solutions.
pub struct Solver {
    search: Search,
    status: RwLock<SolverStatus>,
    created_at: Timestamp,
}

impl Solver {
    pub fn new(problem: VehicleRoutingProblem, params: SolverParams) -> Self {
        Self::from_arc(Arc::new(problem), params)
    }

    pub fn from_arc(problem: Arc<VehicleRoutingProblem>, params: SolverParams) -> Self {
        Solver {
            search: Search::new(params, problem),
            status: RwLock::new(SolverStatus::Pending),
            created_at: Timestamp::now(),
        }
    }

    /// Seeds construction with a partial assignment. Fails if a route
    /// references an unknown vehicle or job, repeats a job, or reuses a
    /// vehicle of a finite fleet.
    pub fn with_initial_routes(mut self, routes: Vec<InitialRoute>) -> Result<Self, SolverError> {
        self.search.set_initial_routes(routes)?;
        Ok(self)
    }

    pub fn on_best_solution<F>(&mut self, callback: F)
    where
        F: FnMut(&AcceptedSolution) + Send + Sync + 'static,
    {
        self.search.on_best_solution(callback);
    }

    /// Runs construction then the search, and returns once every search
    /// thread has finished.
    pub fn solve(&self) -> Result<(), SolverError> {
        *self.status.write() = SolverStatus::Running;
        let result = self.search.run();
        *self.status.write() = SolverStatus::Completed;
        result
    }

    pub fn stop(&self) {
        self.search.stop();
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn cost_evaluator(&self) -> &CostEvaluator {
        self.search.evaluator()
    }

    /// Snapshot of the pool, best first.
    pub fn solutions(&self) -> Vec<AcceptedSolution> {
        self.search.pool().read().solutions().to_vec()
    }

    pub fn best_solution(&self) -> Result<AcceptedSolution, SolverError> {
        let pool = self.search.pool().read();
        let best = pool.best_of()?;
        Ok(best.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use crate::{
        error::InvalidProblemError, problem::fleet::FleetSize, solver::solver_params::Threads,
        test_utils,
    };

    use super::*;

    fn params(max_iterations: usize) -> SolverParams {
        SolverParams {
            max_iterations,
            search_threads: Threads::Single,
            insertion_threads: Threads::Single,
            ..SolverParams::default()
        }
    }

    fn problem() -> VehicleRoutingProblem {
        test_utils::create_test_problem(
            test_utils::create_location_grid(5, 5),
            test_utils::create_basic_services(vec![1, 3, 7, 9, 13, 16, 20, 22]),
            test_utils::create_basic_vehicles(vec![0, 24]),
        )
    }

    #[test]
    fn test_best_solution_before_solve_fails() {
        let solver = Solver::new(problem(), params(10));

        assert_eq!(solver.status(), SolverStatus::Pending);
        assert!(matches!(
            solver.best_solution(),
            Err(SolverError::EmptyPool(_))
        ));
    }

    #[test]
    fn test_solve_assigns_all_jobs() {
        let solver = Solver::new(problem(), params(200));
        solver.solve().unwrap();

        let best = solver.best_solution().unwrap();
        assert_eq!(solver.status(), SolverStatus::Completed);
        assert!(!best.solution.has_unassigned());
        assert!(best.is_feasible());
        assert!(
            solver
                .solutions()
                .windows(2)
                .all(|pair| pair[0].score <= pair[1].score)
        );
    }

    #[test]
    fn test_best_solution_callback_reports_each_new_best() {
        let mut solver = Solver::new(problem(), params(300));
        let scores = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let recorded = Arc::clone(&scores);
        solver.on_best_solution(move |accepted| recorded.lock().push(accepted.score));

        solver.solve().unwrap();

        let scores = scores.lock();
        assert!(!scores.is_empty());
        assert!(scores.windows(2).all(|pair| pair[1] <= pair[0]));
        assert_eq!(solver.best_solution().unwrap().score, *scores.last().unwrap());
    }

    #[test]
    fn test_stop_before_solve_keeps_construction() {
        let mut solver = Solver::new(problem(), params(10_000));
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        solver.on_best_solution(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        solver.stop();
        solver.solve().unwrap();

        assert_eq!(solver.solutions().len(), 1);
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_initial_routes_are_validated() {
        let solver = Solver::new(
            problem(),
            SolverParams {
                fleet_size: Some(FleetSize::Finite),
                ..params(10)
            },
        );

        let result = solver.with_initial_routes(vec![
            InitialRoute {
                vehicle: 0.into(),
                jobs: vec![0.into(), 1.into()],
            },
            InitialRoute {
                vehicle: 1.into(),
                jobs: vec![1.into()],
            },
        ]);

        assert!(matches!(
            result,
            Err(SolverError::InvalidProblem(
                InvalidProblemError::JobAssignedTwice(1)
            ))
        ));
    }
}
