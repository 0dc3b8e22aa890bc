use std::{fs::File, io::BufReader, path::PathBuf, sync::Arc};

use clap::Args;
use tracing::info;
use vrp_optimizer::{
    problem::{
        activity_costs::{ActivityCosts, TourActivity},
        capacity::Capacity,
        fleet::FleetSize,
        job::ServiceBuilder,
        location::Location,
        vehicle::{Vehicle, VehicleBuilder},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
        vehicle_type::VehicleTypeBuilder,
    },
    solver::{
        solver::Solver,
        solver_params::{SolverParams, Threads},
    },
};

use crate::{parsers, report};

const STANDARD_TYPE: &str = "vehicleType1";
const FAST_TYPE: &str = "vehicleType2";
const SERVICE_DURATION: f64 = 20.0;

#[derive(Args)]
pub struct MultiDepotArgs {
    /// Iterations, split across the search threads
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Search threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Threads evaluating insertions of each search thread
    #[arg(long)]
    insertion_threads: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Timeout for the solver (e.g., "30s", "5m", "PT1H30M")
    #[arg(long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,

    /// "finite" or "infinite"
    #[arg(long, value_parser = parsers::parse_fleet_size)]
    fleet_size: Option<FleetSize>,

    /// JSON file of solver parameters, missing fields keep their defaults
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Print the best solution as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Vehicles of the fast type serve customers ten times faster.
struct VehicleDependentDuration;

impl ActivityCosts for VehicleDependentDuration {
    fn cost(&self, _activity: &TourActivity, _arrival_time: f64, _vehicle: &Vehicle) -> f64 {
        0.0
    }

    fn duration(&self, activity: &TourActivity, _arrival_time: f64, vehicle: &Vehicle) -> f64 {
        if vehicle.vehicle_type().type_id() == STANDARD_TYPE {
            activity.operation_time()
        } else {
            activity.operation_time() / 10.0
        }
    }
}

/// One vehicle at each depot, (10,10) and (50,50), and four pickups around
/// each of them.
pub fn build_problem(fleet_size: FleetSize) -> anyhow::Result<VehicleRoutingProblem> {
    let mut builder = VehicleRoutingProblemBuilder::default();

    for (index, (type_id, (x, y))) in [(STANDARD_TYPE, (10.0, 10.0)), (FAST_TYPE, (50.0, 50.0))]
        .into_iter()
        .enumerate()
    {
        let mut vehicle_type = VehicleTypeBuilder::default();
        vehicle_type
            .set_type_id(type_id)
            .set_capacity(Capacity::from_vec(vec![8.0]))
            .set_cost_per_distance(1.0);

        let depot = builder.add_location(Location::from_cartesian(x, y));
        let mut vehicle = VehicleBuilder::default();
        vehicle
            .set_external_id(format!("vehicles@[{x},{y}]"))
            .set_vehicle_type(Arc::new(vehicle_type.build()?))
            .set_start_location_id(depot);
        builder.add_vehicle(vehicle.build()?);

        info!(vehicle = index, type_id, "Depot at ({x}, {y})");
    }

    for (index, (x, y)) in [
        (5.0, 7.0),
        (5.0, 13.0),
        (15.0, 7.0),
        (15.0, 13.0),
        (55.0, 57.0),
        (55.0, 63.0),
        (65.0, 57.0),
        (65.0, 63.0),
    ]
    .into_iter()
    .enumerate()
    {
        let location = builder.add_location(Location::from_cartesian(x, y));
        let mut service = ServiceBuilder::default();
        service
            .set_external_id((index + 1).to_string())
            .set_location_id(location)
            .set_service_duration(SERVICE_DURATION)
            .set_demand(Capacity::from_vec(vec![1.0]));
        builder.add_job(service.build()?);
    }

    builder
        .set_fleet_size(fleet_size)
        .set_activity_costs(Arc::new(VehicleDependentDuration));

    Ok(builder.build()?)
}

fn solver_params(args: &MultiDepotArgs) -> anyhow::Result<SolverParams> {
    let mut params = match &args.params {
        Some(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
        None => SolverParams {
            max_iterations: 100,
            ..SolverParams::default()
        },
    };

    if let Some(iterations) = args.iterations {
        params.max_iterations = iterations;
    }

    if let Some(threads) = args.threads {
        params.search_threads = Threads::Multi(threads);
    }

    if let Some(threads) = args.insertion_threads {
        params.insertion_threads = Threads::Multi(threads);
    }

    if let Some(seed) = args.seed {
        params.seed = seed;
    }

    if args.timeout.is_some() {
        params.max_duration = args.timeout;
    }

    Ok(params)
}

pub fn run(args: MultiDepotArgs) -> anyhow::Result<()> {
    let params = solver_params(&args)?;
    let fleet_size = args
        .fleet_size
        .or(params.fleet_size)
        .unwrap_or(FleetSize::Infinite);

    let problem = build_problem(fleet_size)?;
    info!(
        jobs = problem.jobs().len(),
        vehicles = problem.vehicles().len(),
        ?fleet_size,
        "Problem built"
    );

    let mut solver = Solver::new(problem, params);
    solver.on_best_solution(|best| {
        info!(
            score = %best.score,
            routes = best.solution.non_empty_routes_count(),
            "Improved"
        );
    });

    solver.solve()?;

    let best = solver.best_solution()?;
    let summary = best.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", report::summary_table(&summary));
        println!("{}", report::routes_table(&summary));
    }

    Ok(())
}
