use std::sync::Arc;

use fxhash::FxHashSet;

use crate::{
    error::InvalidProblemError,
    problem::{
        activity_costs::{ActivityCosts, DefaultActivityCosts, TourActivity},
        fleet::FleetSize,
        job::{ActivityId, Job, JobIdx, Service, Shipment, Task},
        job_location_index::JobLocationIndex,
    },
    utils::enumerate_idx::EnumerateIdx,
};

use super::{
    location::{Location, LocationIdx},
    travel_cost_matrix::{Distance, Time, TransportCosts, TravelMatrices},
    vehicle::{Vehicle, VehicleIdx},
};

/// Immutable description of what has to be served and with which vehicles.
/// Shared read-only by every search worker.
pub struct VehicleRoutingProblem {
    locations: Vec<Location>,
    vehicles: Vec<Vehicle>,
    jobs: Vec<Job>,
    fleet_size: FleetSize,
    activity_costs: Arc<dyn ActivityCosts>,
    transport_costs: Arc<dyn TransportCosts>,
    job_location_index: JobLocationIndex,

    has_time_windows: bool,
    capacity_dimensions: usize,
    average_cost_from_depot: Vec<f64>,
}

impl VehicleRoutingProblem {
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, job_id: JobIdx) -> &Job {
        &self.jobs[job_id]
    }

    pub fn job_ids(&self) -> impl Iterator<Item = JobIdx> + use<> {
        (0..self.jobs.len()).map(JobIdx::new)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        &self.vehicles[vehicle_id]
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, location_id: LocationIdx) -> &Location {
        &self.locations[location_id]
    }

    pub fn fleet_size(&self) -> FleetSize {
        self.fleet_size
    }

    pub fn activity_costs(&self) -> &dyn ActivityCosts {
        self.activity_costs.as_ref()
    }

    pub fn transport_costs(&self) -> &dyn TransportCosts {
        self.transport_costs.as_ref()
    }

    pub fn task(&self, activity_id: ActivityId) -> &Task {
        match (activity_id, &self.jobs[activity_id.job_id()]) {
            (ActivityId::Service(_), Job::Service(service)) => service.task(),
            (ActivityId::ShipmentPickup(_), Job::Shipment(shipment)) => shipment.pickup(),
            (ActivityId::ShipmentDelivery(_), Job::Shipment(shipment)) => shipment.delivery(),
            (activity_id, job) => unreachable!(
                "activity {activity_id} does not belong to job {}",
                job.external_id()
            ),
        }
    }

    pub fn tour_activity(&self, activity_id: ActivityId) -> TourActivity<'_> {
        TourActivity::new(activity_id, self.task(activity_id))
    }

    pub fn service(&self, job_id: JobIdx) -> Option<&Service> {
        match &self.jobs[job_id] {
            Job::Service(service) => Some(service),
            Job::Shipment(_) => None,
        }
    }

    pub fn shipment(&self, job_id: JobIdx) -> Option<&Shipment> {
        match &self.jobs[job_id] {
            Job::Shipment(shipment) => Some(shipment),
            Job::Service(_) => None,
        }
    }

    #[inline]
    pub fn travel_distance(&self, vehicle: &Vehicle, from: LocationIdx, to: LocationIdx) -> Distance {
        self.transport_costs.distance(from, to, vehicle)
    }

    #[inline]
    pub fn travel_time(&self, vehicle: &Vehicle, from: LocationIdx, to: LocationIdx) -> Time {
        self.transport_costs.travel_time(from, to, vehicle)
    }

    #[inline]
    pub fn travel_cost(&self, vehicle: &Vehicle, from: LocationIdx, to: LocationIdx) -> f64 {
        self.transport_costs.transport_cost(from, to, vehicle)
    }

    /// Activities ordered by increasing distance to the location.
    pub fn nearest_activities_of_location(
        &self,
        location_id: LocationIdx,
    ) -> impl Iterator<Item = ActivityId> + '_ {
        self.job_location_index
            .nearest_neighbor_iter(&self.locations[location_id])
    }

    /// Other jobs ordered by increasing distance to the first activity of `job_id`.
    pub fn nearest_jobs(&self, job_id: JobIdx) -> impl Iterator<Item = JobIdx> + '_ {
        let location_id = self.jobs[job_id]
            .tasks()
            .next()
            .map(Task::location_id)
            .unwrap_or_default();
        let mut seen = FxHashSet::default();
        seen.insert(job_id);

        self.nearest_activities_of_location(location_id)
            .map(|activity_id| activity_id.job_id())
            .filter(move |&other| seen.insert(other))
    }

    pub fn has_time_windows(&self) -> bool {
        self.has_time_windows
    }

    pub fn capacity_dimensions(&self) -> usize {
        self.capacity_dimensions
    }

    pub fn average_cost_from_depot(&self, location_id: LocationIdx) -> f64 {
        self.average_cost_from_depot[location_id.get()]
    }

    fn precompute_average_cost_from_depot(
        locations: &[Location],
        vehicles: &[Vehicle],
        transport_costs: &dyn TransportCosts,
    ) -> Vec<f64> {
        locations
            .iter()
            .enumerate_idx()
            .map(|(location_id, _): (LocationIdx, _)| {
                if vehicles.is_empty() {
                    return 0.0;
                }

                vehicles
                    .iter()
                    .map(|vehicle| {
                        transport_costs.transport_cost(
                            vehicle.start_location_id(),
                            location_id,
                            vehicle,
                        )
                    })
                    .sum::<f64>()
                    / vehicles.len() as f64
            })
            .collect()
    }

    fn validate(
        locations: &[Location],
        vehicles: &[Vehicle],
        jobs: &[Job],
    ) -> Result<usize, InvalidProblemError> {
        let check_location = |owner: &str, location_id: LocationIdx| {
            if location_id.get() >= locations.len() {
                Err(InvalidProblemError::UnknownLocation {
                    owner: owner.to_owned(),
                    location_id: location_id.get(),
                })
            } else {
                Ok(())
            }
        };

        let capacity_dimensions = vehicles
            .first()
            .map(|vehicle| vehicle.capacity().dimensions())
            .or_else(|| jobs.first().map(|job| job.demand().dimensions()))
            .unwrap_or(0);

        let mut vehicle_ids = FxHashSet::default();
        for vehicle in vehicles {
            if !vehicle_ids.insert(vehicle.external_id()) {
                return Err(InvalidProblemError::DuplicateVehicleId(
                    vehicle.external_id().to_owned(),
                ));
            }

            check_location(vehicle.external_id(), vehicle.start_location_id())?;
            if let Some(end_location_id) = vehicle.end_location_id() {
                check_location(vehicle.external_id(), end_location_id)?;
            }

            let actual = vehicle.capacity().dimensions();
            if actual != capacity_dimensions {
                return Err(InvalidProblemError::VehicleTypeDimensionMismatch {
                    type_id: vehicle.vehicle_type().type_id().to_owned(),
                    expected: capacity_dimensions,
                    actual,
                });
            }
        }

        let mut job_ids = FxHashSet::default();
        for job in jobs {
            if !job_ids.insert(job.external_id()) {
                return Err(InvalidProblemError::DuplicateJobId(
                    job.external_id().to_owned(),
                ));
            }

            // An empty demand vector means the job does not load the vehicle.
            let actual = job.demand().dimensions();
            if actual != 0 && actual != capacity_dimensions {
                return Err(InvalidProblemError::CapacityDimensionMismatch {
                    job_id: job.external_id().to_owned(),
                    expected: capacity_dimensions,
                    actual,
                });
            }

            for task in job.tasks() {
                check_location(job.external_id(), task.location_id())?;
                if task.time_window().is_some_and(|tw| !tw.is_valid()) {
                    return Err(InvalidProblemError::InvalidTimeWindow {
                        owner: job.external_id().to_owned(),
                    });
                }
            }
        }

        Ok(capacity_dimensions)
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    locations: Option<Vec<Location>>,
    vehicles: Option<Vec<Vehicle>>,
    jobs: Vec<Job>,
    fleet_size: Option<FleetSize>,
    activity_costs: Option<Arc<dyn ActivityCosts>>,
    transport_costs: Option<Arc<dyn TransportCosts>>,
}

impl VehicleRoutingProblemBuilder {
    pub fn set_locations(&mut self, locations: Vec<Location>) -> &mut VehicleRoutingProblemBuilder {
        self.locations = Some(locations);
        self
    }

    pub fn add_location(&mut self, location: Location) -> LocationIdx {
        let locations = self.locations.get_or_insert_with(Vec::new);
        locations.push(location);
        LocationIdx::new(locations.len() - 1)
    }

    pub fn set_vehicles(&mut self, vehicles: Vec<Vehicle>) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles = Some(vehicles);
        self
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) -> &mut VehicleRoutingProblemBuilder {
        self.vehicles.get_or_insert_with(Vec::new).push(vehicle);
        self
    }

    pub fn set_services(&mut self, services: Vec<Service>) -> &mut VehicleRoutingProblemBuilder {
        self.jobs.retain(|job| !matches!(job, Job::Service(_)));
        self.jobs.extend(services.into_iter().map(Job::Service));
        self
    }

    pub fn add_job(&mut self, job: impl Into<Job>) -> &mut VehicleRoutingProblemBuilder {
        self.jobs.push(job.into());
        self
    }

    pub fn set_fleet_size(&mut self, fleet_size: FleetSize) -> &mut VehicleRoutingProblemBuilder {
        self.fleet_size = Some(fleet_size);
        self
    }

    pub fn set_activity_costs(
        &mut self,
        activity_costs: Arc<dyn ActivityCosts>,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.activity_costs = Some(activity_costs);
        self
    }

    pub fn set_transport_costs(
        &mut self,
        transport_costs: Arc<dyn TransportCosts>,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.transport_costs = Some(transport_costs);
        self
    }

    /// Validates the model. Distances default to euclidean over the locations.
    pub fn build(self) -> Result<VehicleRoutingProblem, InvalidProblemError> {
        let locations = self.locations.unwrap_or_default();
        let vehicles = self.vehicles.unwrap_or_default();
        let jobs = self.jobs;

        let capacity_dimensions = VehicleRoutingProblem::validate(&locations, &vehicles, &jobs)?;

        let transport_costs = self
            .transport_costs
            .unwrap_or_else(|| Arc::new(TravelMatrices::from_euclidean(&locations)));
        if transport_costs.num_locations() < locations.len() {
            return Err(InvalidProblemError::UnknownLocation {
                owner: String::from("transport costs"),
                location_id: transport_costs.num_locations(),
            });
        }

        let average_cost_from_depot = VehicleRoutingProblem::precompute_average_cost_from_depot(
            &locations,
            &vehicles,
            transport_costs.as_ref(),
        );

        Ok(VehicleRoutingProblem {
            job_location_index: JobLocationIndex::new(&locations, &jobs),
            has_time_windows: jobs.iter().any(Job::has_time_windows)
                || vehicles.iter().any(|vehicle| vehicle.latest_end().is_some()),
            capacity_dimensions,
            average_cost_from_depot,
            locations,
            vehicles,
            jobs,
            fleet_size: self.fleet_size.unwrap_or_default(),
            activity_costs: self
                .activity_costs
                .unwrap_or_else(|| Arc::new(DefaultActivityCosts)),
            transport_costs,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        problem::{capacity::Capacity, job::ServiceBuilder},
        test_utils::{self, create_basic_services, create_basic_vehicles, create_location_grid},
    };

    use super::*;

    #[test]
    fn test_build_rejects_dimension_mismatch() {
        let mut service = ServiceBuilder::default();
        service
            .set_external_id("s1")
            .set_location_id(1)
            .set_demand(Capacity::from_vec(vec![1.0, 1.0]));

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_locations(create_location_grid(2, 2))
            .set_vehicles(create_basic_vehicles(vec![0]))
            .set_services(vec![service.build().unwrap()]);

        assert_eq!(
            builder.build().err(),
            Some(InvalidProblemError::CapacityDimensionMismatch {
                job_id: String::from("s1"),
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_build_rejects_unknown_location() {
        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_locations(create_location_grid(2, 2))
            .set_vehicles(create_basic_vehicles(vec![0]))
            .set_services(create_basic_services(vec![1, 9]));

        assert_eq!(
            builder.build().err(),
            Some(InvalidProblemError::UnknownLocation {
                owner: String::from("1"),
                location_id: 9
            })
        );
    }

    #[test]
    fn test_build_rejects_duplicate_job_ids() {
        let mut services = create_basic_services(vec![1]);
        services.extend(create_basic_services(vec![2]));

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_locations(create_location_grid(2, 2))
            .set_vehicles(create_basic_vehicles(vec![0]))
            .set_services(services);

        assert_eq!(
            builder.build().err(),
            Some(InvalidProblemError::DuplicateJobId(String::from("0")))
        );
    }

    #[test]
    fn test_nearest_jobs_skips_itself() {
        let problem = test_utils::create_test_problem(
            create_location_grid(4, 4),
            create_basic_services(vec![0, 1, 2, 15]),
            create_basic_vehicles(vec![0]),
        );

        assert_eq!(
            problem.nearest_jobs(JobIdx::new(0)).collect::<Vec<_>>(),
            vec![JobIdx::new(1), JobIdx::new(2), JobIdx::new(3)]
        );
    }

    #[test]
    fn test_average_cost_from_depot() {
        let problem = test_utils::create_test_problem(
            create_location_grid(1, 4),
            create_basic_services(vec![1]),
            create_basic_vehicles(vec![0, 2]),
        );

        assert_eq!(problem.average_cost_from_depot(LocationIdx::new(1)), 1.0);
        assert_eq!(problem.average_cost_from_depot(LocationIdx::new(3)), 2.0);
    }
}
