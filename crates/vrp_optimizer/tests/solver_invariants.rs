mod setup;

use jiff::SignedDuration;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use vrp_optimizer::{
    error::InvalidProblemError,
    problem::{
        capacity::Capacity, fleet::FleetSize, job::ServiceBuilder,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        accepted_solution::AcceptedSolution,
        solver::Solver,
        solver_params::{SolverParams, Threads},
    },
};

use crate::setup::{ProblemSetup, params, vehicle_type};

fn scattered_problem(seed: u64, num_jobs: usize) -> VehicleRoutingProblem {
    let mut rng = SmallRng::seed_from_u64(seed);
    let truck = vehicle_type("truck", 10.0);
    let mut setup = ProblemSetup::new(FleetSize::Finite);

    setup
        .vehicle(20.0, 20.0, &truck)
        .vehicle(80.0, 20.0, &truck)
        .vehicle(50.0, 80.0, &truck);

    for _ in 0..num_jobs {
        setup.service(
            rng.random_range(0.0..100.0),
            rng.random_range(0.0..100.0),
            rng.random_range(1..4) as f64,
            rng.random_range(0.0..5.0),
        );
    }

    setup.build()
}

fn routes_of(accepted: &AcceptedSolution) -> Vec<Vec<String>> {
    accepted
        .summary()
        .routes
        .into_iter()
        .map(|route| route.activities)
        .collect()
}

#[test]
fn test_fixed_seed_is_deterministic() {
    let run = || {
        let solver = Solver::new(scattered_problem(3, 25), params(300));
        solver.solve().unwrap();
        solver.solutions()
    };

    let first = run();
    let second = run();

    assert!(!first.is_empty());
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.score, b.score);
        assert_eq!(routes_of(a), routes_of(b));
    }
}

#[test]
fn test_pooled_solutions_respect_capacity() {
    let solver = Solver::new(scattered_problem(11, 30), params(400));
    solver.solve().unwrap();

    for accepted in solver.solutions() {
        let problem = accepted.solution.problem();
        for route in accepted.solution.non_empty_routes_iter() {
            let capacity = route.vehicle(problem).capacity();
            for load in route.current_loads() {
                assert!(capacity.satisfies_demand(load));
            }
        }
    }
}

#[test]
fn test_every_job_is_either_assigned_or_unassigned() {
    let solver = Solver::new(scattered_problem(5, 40), params(300));
    solver.solve().unwrap();

    for accepted in solver.solutions() {
        let solution = &accepted.solution;
        let routed: usize = solution
            .non_empty_routes_iter()
            .map(|route| route.job_ids().count())
            .sum();

        assert_eq!(solution.assigned_jobs_count(), routed);
        assert_eq!(
            solution.assigned_jobs_count() + solution.unassigned_jobs().len(),
            solution.problem().jobs().len()
        );
    }
}

#[test]
fn test_reevaluating_a_solution_gives_the_same_score() {
    let solver = Solver::new(scattered_problem(7, 20), params(200));
    solver.solve().unwrap();

    let best = solver.best_solution().unwrap();
    let evaluator = solver.cost_evaluator();

    assert_eq!(evaluator.solution_score(&best.solution), best.score);
    assert_eq!(
        evaluator.solution_score(&best.solution),
        evaluator.solution_score(&best.solution.clone())
    );
}

#[test]
fn test_parallel_search_fills_the_pool() {
    let solver = Solver::new(
        scattered_problem(13, 30),
        SolverParams {
            search_threads: Threads::Multi(3),
            insertion_threads: Threads::Multi(2),
            sync_interval: 50,
            pool_capacity: 5,
            ..params(200)
        },
    );
    solver.solve().unwrap();

    let solutions = solver.solutions();
    assert!(!solutions.is_empty());
    assert!(solutions.len() <= 5);
    assert!(
        solutions
            .windows(2)
            .all(|pair| pair[0].compare(&pair[1]).is_le())
    );
}

#[test]
fn test_time_budget_stops_the_search() {
    let solver = Solver::new(
        scattered_problem(17, 50),
        SolverParams {
            max_iterations: usize::MAX,
            max_duration: Some(SignedDuration::from_millis(200)),
            ..params(0)
        },
    );
    solver.solve().unwrap();

    assert!(solver.best_solution().is_ok());
}

#[test]
fn test_capacity_dimension_mismatch_is_rejected() {
    let mut setup = ProblemSetup::new(FleetSize::Finite);
    setup.vehicle(0.0, 0.0, &vehicle_type("truck", 10.0));
    let location_id = setup.location(1.0, 1.0);

    let mut service = ServiceBuilder::default();
    service
        .set_external_id("two-dimensional")
        .set_location_id(location_id)
        .set_demand(Capacity::from_vec(vec![1.0, 2.0]));
    setup.builder().add_job(service.build().unwrap());

    assert_eq!(
        setup.try_build().err(),
        Some(InvalidProblemError::CapacityDimensionMismatch {
            job_id: String::from("two-dimensional"),
            expected: 1,
            actual: 2,
        })
    );
}
