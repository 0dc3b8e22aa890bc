use std::sync::Arc;

use rand::RngCore;

use crate::{
    problem::{
        capacity::Capacity,
        fleet::FleetSize,
        job::{Job, Service, ServiceBuilder, ServiceType},
        location::Location,
        vehicle::{Vehicle, VehicleBuilder},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
        vehicle_type::{VehicleType, VehicleTypeBuilder},
    },
    solver::{
        insertion::{Insertion, ServiceInsertion},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

pub const BASIC_VEHICLE_CAPACITY: f64 = 100.0;

pub fn create_location_grid(rows: usize, cols: usize) -> Vec<Location> {
    let mut locations = Vec::new();

    for y in 0..rows {
        for x in 0..cols {
            let location = Location::from_cartesian(x as f64, y as f64);
            locations.push(location);
        }
    }

    locations
}

/// Pickup services of demand 1 at the given locations.
pub fn create_basic_services(location_ids: Vec<usize>) -> Vec<Service> {
    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| {
            let mut builder = ServiceBuilder::default();
            builder
                .set_location_id(location_id)
                .set_external_id(index.to_string())
                .set_demand(Capacity::from_vec(vec![1.0]));
            builder.build().unwrap()
        })
        .collect()
}

pub fn create_vehicle_type(type_id: &str, capacity: f64) -> Arc<VehicleType> {
    let mut builder = VehicleTypeBuilder::default();
    builder
        .set_type_id(type_id)
        .set_capacity(Capacity::from_vec(vec![capacity]))
        .set_cost_per_distance(1.0);
    Arc::new(builder.build().unwrap())
}

/// Vehicles of one shared type, starting and ending at the given locations.
pub fn create_basic_vehicles(location_ids: Vec<usize>) -> Vec<Vehicle> {
    let vehicle_type = create_vehicle_type("basic", BASIC_VEHICLE_CAPACITY);

    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| {
            let mut builder = VehicleBuilder::default();
            builder
                .set_external_id(index.to_string())
                .set_vehicle_type(Arc::clone(&vehicle_type))
                .set_start_location_id(location_id);
            builder.build().unwrap()
        })
        .collect()
}

pub fn create_test_problem(
    locations: Vec<Location>,
    services: Vec<Service>,
    vehicles: Vec<Vehicle>,
) -> VehicleRoutingProblem {
    create_test_problem_with_fleet(locations, services, vehicles, FleetSize::Finite)
}

pub fn create_test_problem_with_fleet(
    locations: Vec<Location>,
    services: Vec<Service>,
    vehicles: Vec<Vehicle>,
    fleet_size: FleetSize,
) -> VehicleRoutingProblem {
    let mut builder = VehicleRoutingProblemBuilder::default();

    builder
        .set_locations(locations)
        .set_services(services)
        .set_vehicles(vehicles)
        .set_fleet_size(fleet_size);

    builder.build().unwrap()
}

pub struct TestRoute {
    pub vehicle_id: usize,
    pub service_ids: Vec<usize>,
}

/// Finite-fleet solution where route `i` is driven by vehicle
/// `routes[i].vehicle_id` and visits the services in order.
pub fn create_test_working_solution(
    problem: Arc<VehicleRoutingProblem>,
    routes: Vec<TestRoute>,
) -> WorkingSolution {
    let mut solution = WorkingSolution::new(problem, FleetSize::Finite);

    for route in routes.iter() {
        for (index, &service_id) in route.service_ids.iter().enumerate() {
            solution.insert(&Insertion::Service(ServiceInsertion {
                route_id: RouteIdx::new(route.vehicle_id),
                job_index: service_id.into(),
                position: index,
            }));
        }
    }

    solution
}

/// Problem on a `rows` x `cols` grid with unit distances, jobs and vehicles
/// added one by one.
pub struct TestProblemBuilder {
    locations: Vec<Location>,
    jobs: Vec<Job>,
    vehicles: Vec<Vehicle>,
    fleet_size: FleetSize,
}

impl TestProblemBuilder {
    pub fn grid(rows: usize, cols: usize) -> Self {
        TestProblemBuilder {
            locations: create_location_grid(rows, cols),
            jobs: Vec::new(),
            vehicles: Vec::new(),
            fleet_size: FleetSize::Finite,
        }
    }

    pub fn add_service(
        &mut self,
        location_id: usize,
        demand: f64,
        service_type: ServiceType,
    ) -> &mut Self {
        let mut builder = ServiceBuilder::default();
        builder
            .set_external_id(format!("s{}", self.jobs.len()))
            .set_location_id(location_id)
            .set_demand(Capacity::from_vec(vec![demand]))
            .set_service_type(service_type);
        self.jobs.push(Job::Service(builder.build().unwrap()));
        self
    }

    pub fn add_job(&mut self, job: impl Into<Job>) -> &mut Self {
        self.jobs.push(job.into());
        self
    }

    pub fn add_vehicle(&mut self, location_id: usize, capacity: f64) -> &mut Self {
        let mut builder = VehicleBuilder::default();
        builder
            .set_external_id(format!("v{}", self.vehicles.len()))
            .set_vehicle_type(create_vehicle_type("test", capacity))
            .set_start_location_id(location_id);
        self.vehicles.push(builder.build().unwrap());
        self
    }

    pub fn set_fleet_size(&mut self, fleet_size: FleetSize) -> &mut Self {
        self.fleet_size = fleet_size;
        self
    }

    pub fn build(&self) -> VehicleRoutingProblem {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_locations(self.locations.clone())
            .set_vehicles(self.vehicles.clone())
            .set_fleet_size(self.fleet_size);
        for job in &self.jobs {
            builder.add_job(job.clone());
        }

        builder.build().unwrap()
    }
}

/// Replays a fixed sequence of values, for tests that need to steer random
/// choices.
pub struct MockRng {
    data: Vec<u64>,
    index: usize,
}

impl MockRng {
    pub fn new(data: Vec<u64>) -> Self {
        MockRng { data, index: 0 }
    }
}

impl RngCore for MockRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        let value = self.data[self.index % self.data.len()];
        self.index = (self.index + 1) % self.data.len();
        value
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for byte in dst.iter_mut() {
            *byte = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_mock_rng() {
        let data = vec![1, 2, 3, 4];
        let mut rng = MockRng::new(data.clone());

        for &expected in data.iter().cycle().take(8) {
            let value = rng.next_u64();
            assert_eq!(value, expected);
        }
    }

    #[test]
    fn test_random_bool() {
        let data = vec![
            (u64::MAX / 4),
            (u64::MAX / 4),
            (u64::MAX / 4),
            (u64::MAX / 4),
        ];
        let mut rng = MockRng::new(data);

        assert!(!rng.random_bool(0.20));
        assert!(rng.random_bool(0.26));
        assert!(rng.random_bool(0.6));
        assert!(!rng.random_bool(0.10));
    }

    #[test]
    fn test_problem_builder() {
        let mut builder = TestProblemBuilder::grid(2, 3);
        builder
            .add_service(4, 2.0, ServiceType::Delivery)
            .add_vehicle(0, 5.0);
        let problem = builder.build();

        assert_eq!(problem.locations().len(), 6);
        assert_eq!(problem.jobs().len(), 1);
        assert_eq!(problem.vehicles().len(), 1);
        assert_eq!(problem.capacity_dimensions(), 1);
    }
}
