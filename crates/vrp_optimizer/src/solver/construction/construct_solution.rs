use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::{
    problem::{fleet::FleetSize, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{
        cost_evaluator::CostEvaluator, recreate::cheapest_insertion::CheapestInsertion,
        solution::working_solution::WorkingSolution,
    },
};

/// Builds a solution from scratch with global cheapest insertion.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct_solution(
    problem: &Arc<VehicleRoutingProblem>,
    evaluator: &CostEvaluator,
    fleet_size: FleetSize,
    thread_pool: &rayon::ThreadPool,
) -> WorkingSolution {
    let mut solution = WorkingSolution::new(Arc::clone(problem), fleet_size);
    complete_solution(&mut solution, evaluator, thread_pool);
    solution
}

/// Inserts the unassigned jobs of a partial solution until no job has a
/// feasible position left.
pub fn complete_solution(
    solution: &mut WorkingSolution,
    evaluator: &CostEvaluator,
    thread_pool: &rayon::ThreadPool,
) {
    CheapestInsertion::insert_jobs(solution, evaluator, thread_pool);
    solution.compact_routes();

    debug!(
        routes = solution.non_empty_routes_count(),
        unassigned = solution.unassigned_jobs().len(),
        "Constructed initial solution"
    );
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::{
            capacity::Capacity,
            vehicle::VehicleBuilder,
            vehicle_routing_problem::VehicleRoutingProblemBuilder,
            vehicle_type::VehicleTypeBuilder,
        },
        solver::solution::working_solution::InitialRoute,
        test_utils,
    };

    use super::*;

    fn thread_pool() -> rayon::ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_construct_assigns_all_jobs() {
        let problem = Arc::new(test_utils::create_test_problem(
            test_utils::create_location_grid(5, 5),
            test_utils::create_basic_services(vec![1, 7, 12, 18, 23]),
            test_utils::create_basic_vehicles(vec![0]),
        ));

        let solution = construct_solution(
            &problem,
            &CostEvaluator::new(1000.0),
            FleetSize::Finite,
            &thread_pool(),
        );

        assert!(!solution.has_unassigned());
        assert_eq!(solution.non_empty_routes_count(), 1);
    }

    #[test]
    fn test_construct_without_jobs() {
        let problem = Arc::new(test_utils::create_test_problem(
            test_utils::create_location_grid(2, 2),
            vec![],
            test_utils::create_basic_vehicles(vec![0]),
        ));

        let solution = construct_solution(
            &problem,
            &CostEvaluator::new(1000.0),
            FleetSize::Infinite,
            &thread_pool(),
        );

        assert_eq!(solution.non_empty_routes_count(), 0);
        assert_eq!(solution.total_cost(), 0.0);
        assert!(!solution.has_unassigned());
    }

    #[test]
    fn test_infinite_fleet_opens_routes_for_capacity() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder.set_locations(test_utils::create_location_grid(3, 3));
        builder.set_services(test_utils::create_basic_services(vec![2, 4, 6, 8]));

        let mut vehicle_type = VehicleTypeBuilder::default();
        vehicle_type
            .set_type_id("small")
            .set_capacity(Capacity::from_vec(vec![2.0]));
        let vehicle_type = Arc::new(vehicle_type.build().unwrap());

        let mut vehicle = VehicleBuilder::default();
        vehicle
            .set_external_id("template")
            .set_vehicle_type(vehicle_type)
            .set_start_location_id(0);
        builder.add_vehicle(vehicle.build().unwrap());
        builder.set_fleet_size(FleetSize::Infinite);
        let problem = Arc::new(builder.build().unwrap());

        let solution = construct_solution(
            &problem,
            &CostEvaluator::new(1000.0),
            FleetSize::Infinite,
            &thread_pool(),
        );

        assert!(!solution.has_unassigned());
        assert!(solution.non_empty_routes_count() >= 2);
        assert!(
            solution
                .non_empty_routes_iter()
                .all(|route| route.is_feasible(&problem))
        );
    }

    #[test]
    fn test_complete_keeps_initial_routes() {
        let problem = Arc::new(test_utils::create_test_problem(
            test_utils::create_location_grid(3, 3),
            test_utils::create_basic_services(vec![1, 2, 5, 8]),
            test_utils::create_basic_vehicles(vec![0]),
        ));

        let mut solution = WorkingSolution::from_routes(
            Arc::clone(&problem),
            FleetSize::Finite,
            &[InitialRoute {
                vehicle: 0.into(),
                jobs: vec![2.into(), 0.into()],
            }],
        )
        .unwrap();

        complete_solution(&mut solution, &CostEvaluator::new(1000.0), &thread_pool());

        assert!(!solution.has_unassigned());
        assert_eq!(solution.route(0.into()).len(), 4);
    }
}
