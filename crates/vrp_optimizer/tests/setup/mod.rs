#![allow(dead_code)]

use std::sync::Arc;

use vrp_optimizer::{
    error::InvalidProblemError,
    problem::{
        capacity::Capacity,
        fleet::FleetSize,
        job::{ServiceBuilder, ShipmentBuilder, Task},
        location::{Location, LocationIdx},
        vehicle::VehicleBuilder,
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
        vehicle_type::{VehicleType, VehicleTypeBuilder},
    },
    solver::solver_params::{SolverParams, Threads},
};

pub fn params(max_iterations: usize) -> SolverParams {
    SolverParams {
        max_iterations,
        search_threads: Threads::Single,
        insertion_threads: Threads::Single,
        ..SolverParams::default()
    }
}

pub fn vehicle_type(type_id: &str, capacity: f64) -> Arc<VehicleType> {
    let mut builder = VehicleTypeBuilder::default();
    builder
        .set_type_id(type_id)
        .set_capacity(Capacity::from_vec(vec![capacity]))
        .set_cost_per_distance(1.0);
    Arc::new(builder.build().unwrap())
}

/// Builds a problem from `(x, y)` points. Vehicles and services reference
/// the point they start at or are located at.
pub struct ProblemSetup {
    builder: VehicleRoutingProblemBuilder,
    num_vehicles: usize,
    num_jobs: usize,
}

impl ProblemSetup {
    pub fn new(fleet_size: FleetSize) -> Self {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder.set_locations(Vec::new()).set_fleet_size(fleet_size);

        ProblemSetup {
            builder,
            num_vehicles: 0,
            num_jobs: 0,
        }
    }

    pub fn location(&mut self, x: f64, y: f64) -> LocationIdx {
        self.builder.add_location(Location::from_cartesian(x, y))
    }

    pub fn vehicle(&mut self, x: f64, y: f64, vehicle_type: &Arc<VehicleType>) -> &mut Self {
        let location_id = self.location(x, y);
        let mut vehicle = VehicleBuilder::default();
        vehicle
            .set_external_id(format!("vehicle-{}", self.num_vehicles))
            .set_vehicle_type(Arc::clone(vehicle_type))
            .set_start_location_id(location_id);

        self.builder.add_vehicle(vehicle.build().unwrap());
        self.num_vehicles += 1;
        self
    }

    pub fn service(&mut self, x: f64, y: f64, demand: f64, duration: f64) -> &mut Self {
        let location_id = self.location(x, y);
        let mut service = ServiceBuilder::default();
        service
            .set_external_id(format!("job-{}", self.num_jobs))
            .set_location_id(location_id)
            .set_demand(Capacity::from_vec(vec![demand]))
            .set_service_duration(duration);

        self.builder.add_job(service.build().unwrap());
        self.num_jobs += 1;
        self
    }

    pub fn shipment(&mut self, from: (f64, f64), to: (f64, f64), demand: f64) -> &mut Self {
        let pickup = self.location(from.0, from.1);
        let delivery = self.location(to.0, to.1);
        let mut shipment = ShipmentBuilder::default();
        shipment
            .set_external_id(format!("job-{}", self.num_jobs))
            .set_pickup(Task::new(pickup, 0.0, None))
            .set_delivery(Task::new(delivery, 0.0, None))
            .set_demand(Capacity::from_vec(vec![demand]));

        self.builder.add_job(shipment.build().unwrap());
        self.num_jobs += 1;
        self
    }

    pub fn builder(&mut self) -> &mut VehicleRoutingProblemBuilder {
        &mut self.builder
    }

    pub fn try_build(self) -> Result<VehicleRoutingProblem, InvalidProblemError> {
        self.builder.build()
    }

    pub fn build(self) -> VehicleRoutingProblem {
        self.try_build().unwrap()
    }
}

/// Two depots at (10,10) and (50,50), one vehicle of capacity 8 each, and
/// four unit jobs clustered around each depot.
pub fn two_depots_problem() -> VehicleRoutingProblem {
    let truck = vehicle_type("truck", 8.0);
    let mut setup = ProblemSetup::new(FleetSize::Finite);

    setup.vehicle(10.0, 10.0, &truck).vehicle(50.0, 50.0, &truck);

    for (x, y) in [
        (12.0, 8.0),
        (8.0, 12.0),
        (14.0, 14.0),
        (6.0, 6.0),
        (48.0, 52.0),
        (52.0, 48.0),
        (55.0, 55.0),
        (45.0, 46.0),
    ] {
        setup.service(x, y, 1.0, 0.0);
    }

    setup.build()
}
