use std::{hint::black_box, sync::Arc};

use criterion::{Criterion, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use vrp_optimizer::{
    problem::{
        capacity::Capacity,
        fleet::FleetSize,
        job::ServiceBuilder,
        location::Location,
        vehicle::VehicleBuilder,
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
        vehicle_type::VehicleTypeBuilder,
    },
    solver::{
        construction::construct_solution::construct_solution,
        cost_evaluator::CostEvaluator,
        solver::Solver,
        solver_params::{SolverParams, Threads},
    },
};

fn random_problem(num_jobs: usize, num_vehicles: usize) -> VehicleRoutingProblem {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut builder = VehicleRoutingProblemBuilder::default();

    let depot = builder.add_location(Location::from_cartesian(50.0, 50.0));

    let mut vehicle_type = VehicleTypeBuilder::default();
    vehicle_type
        .set_type_id("truck")
        .set_capacity(Capacity::from_vec(vec![20.0]))
        .set_cost_per_distance(1.0);
    let vehicle_type = Arc::new(vehicle_type.build().unwrap());

    for index in 0..num_vehicles {
        let mut vehicle = VehicleBuilder::default();
        vehicle
            .set_external_id(format!("v{index}"))
            .set_vehicle_type(Arc::clone(&vehicle_type))
            .set_start_location_id(depot);
        builder.add_vehicle(vehicle.build().unwrap());
    }

    for index in 0..num_jobs {
        let location = builder.add_location(Location::from_cartesian(
            rng.random_range(0.0..100.0),
            rng.random_range(0.0..100.0),
        ));
        let mut service = ServiceBuilder::default();
        service
            .set_external_id(format!("s{index}"))
            .set_location_id(location)
            .set_demand(Capacity::from_vec(vec![rng.random_range(1..5) as f64]));
        builder.add_job(service.build().unwrap());
    }

    builder.set_fleet_size(FleetSize::Finite);
    builder.build().unwrap()
}

fn construction_benchmark(c: &mut Criterion) {
    let problem = Arc::new(random_problem(200, 40));
    let evaluator = CostEvaluator::new(10_000.0);
    let thread_pool = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();

    c.bench_function("construct_solution 200 jobs", |b| {
        b.iter(|| {
            construct_solution(
                black_box(&problem),
                &evaluator,
                FleetSize::Finite,
                &thread_pool,
            )
        })
    });
}

fn search_benchmark(c: &mut Criterion) {
    let problem = Arc::new(random_problem(60, 15));

    c.bench_function("search 60 jobs 200 iterations", |b| {
        b.iter(|| {
            let solver = Solver::from_arc(
                Arc::clone(&problem),
                SolverParams {
                    max_iterations: 200,
                    insertion_threads: Threads::Single,
                    ..SolverParams::default()
                },
            );
            solver.solve().unwrap();
            black_box(solver.best_solution().unwrap().score)
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = construction_benchmark, search_benchmark
}
criterion_main!(benches);
