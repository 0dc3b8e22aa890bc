use fxhash::FxHashMap;

use crate::{
    problem::{
        capacity::Capacity,
        job::{ActivityId, Job, JobIdx, ServiceType},
        location::LocationIdx,
        vehicle::{Vehicle, VehicleIdx},
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        insertion::{Insertion, ServiceInsertion, ShipmentInsertion},
        solution::utils::{
            ActivitySchedule, compute_activity_schedule, compute_vehicle_end, leg_cost,
        },
    },
};

/// One vehicle's ordered activities plus schedule and load data derived from
/// them. Derived data is recomputed after every change.
#[derive(Clone)]
pub struct WorkingSolutionRoute {
    pub(super) vehicle_id: VehicleIdx,

    // Position of every activity in `activity_ids`
    pub(super) jobs: FxHashMap<ActivityId, usize>,

    pub(super) activity_ids: Vec<ActivityId>,

    pub(super) schedules: Vec<ActivitySchedule>,

    // current_load[0] is the load leaving the start location,
    // current_load[i + 1] the load after activity i
    pub(super) current_load: Vec<Capacity>,

    // fwd_load_peaks[i] is the peak of current_load[0..=i]
    pub(super) fwd_load_peaks: Vec<Capacity>,

    // bwd_load_peaks[i] is the peak of current_load[i..]
    pub(super) bwd_load_peaks: Vec<Capacity>,

    end_arrival_time: f64,
    distance: f64,
    transport_costs: f64,
    activity_costs: f64,
}

impl WorkingSolutionRoute {
    pub fn empty(problem: &VehicleRoutingProblem, vehicle_id: VehicleIdx) -> Self {
        let mut route = WorkingSolutionRoute {
            vehicle_id,
            jobs: FxHashMap::default(),
            activity_ids: Vec::new(),
            schedules: Vec::new(),
            current_load: Vec::new(),
            fwd_load_peaks: Vec::new(),
            bwd_load_peaks: Vec::new(),
            end_arrival_time: 0.0,
            distance: 0.0,
            transport_costs: 0.0,
            activity_costs: 0.0,
        };

        route.update_data(problem);

        route
    }

    pub fn len(&self) -> usize {
        self.activity_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activity_ids.is_empty()
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a VehicleRoutingProblem) -> &'a Vehicle {
        problem.vehicle(self.vehicle_id)
    }

    pub fn activity_ids(&self) -> &[ActivityId] {
        &self.activity_ids
    }

    pub fn activity_id(&self, position: usize) -> ActivityId {
        self.activity_ids[position]
    }

    pub fn schedules(&self) -> &[ActivitySchedule] {
        &self.schedules
    }

    pub fn schedule(&self, position: usize) -> &ActivitySchedule {
        &self.schedules[position]
    }

    pub fn contains_activity(&self, activity_id: ActivityId) -> bool {
        self.jobs.contains_key(&activity_id)
    }

    pub fn activity_position(&self, activity_id: ActivityId) -> Option<usize> {
        self.jobs.get(&activity_id).copied()
    }

    pub fn contains_job(&self, job_id: JobIdx) -> bool {
        self.contains_activity(ActivityId::Service(job_id))
            || self.contains_activity(ActivityId::ShipmentPickup(job_id))
    }

    /// Distinct jobs of the route, in order of first visit.
    pub fn job_ids(&self) -> impl Iterator<Item = JobIdx> + '_ {
        self.activity_ids
            .iter()
            .filter(|activity_id| !matches!(activity_id, ActivityId::ShipmentDelivery(_)))
            .map(ActivityId::job_id)
    }

    pub fn location_id(&self, problem: &VehicleRoutingProblem, position: usize) -> LocationIdx {
        problem.task(self.activity_ids[position]).location_id()
    }

    /// Location the vehicle leaves before reaching `position`.
    pub fn previous_location_id(
        &self,
        problem: &VehicleRoutingProblem,
        position: usize,
    ) -> LocationIdx {
        if position == 0 {
            self.vehicle(problem).start_location_id()
        } else {
            self.location_id(problem, position - 1)
        }
    }

    /// Location the vehicle heads to after `position - 1`; `None` past the end
    /// of an open route.
    pub fn next_location_id(
        &self,
        problem: &VehicleRoutingProblem,
        position: usize,
    ) -> Option<LocationIdx> {
        if position < self.len() {
            Some(self.location_id(problem, position))
        } else {
            self.vehicle(problem).end_location_id()
        }
    }

    pub fn previous_departure_time(&self, problem: &VehicleRoutingProblem, position: usize) -> f64 {
        if position == 0 {
            self.vehicle(problem).earliest_start()
        } else {
            self.schedules[position - 1].departure_time
        }
    }

    pub fn end_arrival_time(&self) -> f64 {
        self.end_arrival_time
    }

    pub fn current_loads(&self) -> &[Capacity] {
        &self.current_load
    }

    pub fn fwd_load_peak(&self, position: usize) -> &Capacity {
        &self.fwd_load_peaks[position]
    }

    pub fn bwd_load_peak(&self, position: usize) -> &Capacity {
        &self.bwd_load_peaks[position]
    }

    /// Peak of the loads before activities `from..=to`.
    pub fn load_peak_between(&self, from: usize, to: usize) -> Capacity {
        let mut peak = self.current_load[from].clone();
        for load in &self.current_load[from + 1..=to] {
            peak.update_max(load);
        }
        peak
    }

    pub fn max_load(&self) -> &Capacity {
        &self.fwd_load_peaks[self.len()]
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn transport_costs(&self) -> f64 {
        self.transport_costs
    }

    pub fn activity_costs(&self) -> f64 {
        self.activity_costs
    }

    pub fn fixed_costs(&self, problem: &VehicleRoutingProblem) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.vehicle(problem).vehicle_type().fixed_cost()
        }
    }

    /// Total cost of driving this route. Empty routes cost nothing.
    pub fn total_cost(&self, problem: &VehicleRoutingProblem) -> f64 {
        if self.is_empty() {
            return 0.0;
        }

        self.fixed_costs(problem) + self.transport_costs + self.activity_costs
    }

    /// Every load fits the vehicle, every activity starts inside its time
    /// window and the vehicle is back before its latest end.
    pub fn is_feasible(&self, problem: &VehicleRoutingProblem) -> bool {
        let vehicle = self.vehicle(problem);

        vehicle.capacity().satisfies_demand(self.max_load())
            && self
                .schedules
                .iter()
                .all(|schedule| schedule.is_on_time(problem))
            && vehicle
                .latest_end()
                .is_none_or(|latest_end| self.end_arrival_time <= latest_end)
    }

    pub fn insert(&mut self, problem: &VehicleRoutingProblem, insertion: &Insertion) {
        match *insertion {
            Insertion::Service(ServiceInsertion {
                job_index,
                position,
                ..
            }) => {
                self.activity_ids
                    .insert(position, ActivityId::Service(job_index));
            }
            Insertion::Shipment(ShipmentInsertion {
                job_index,
                pickup_position,
                delivery_position,
                ..
            }) => {
                self.activity_ids
                    .insert(delivery_position, ActivityId::ShipmentDelivery(job_index));
                self.activity_ids
                    .insert(pickup_position, ActivityId::ShipmentPickup(job_index));
            }
        }

        self.update_data(problem);
    }

    /// Removes every activity of `job_id`. Returns false if the job is not
    /// in this route.
    pub fn remove_job(&mut self, problem: &VehicleRoutingProblem, job_id: JobIdx) -> bool {
        let before = self.activity_ids.len();
        self.activity_ids
            .retain(|activity_id| activity_id.job_id() != job_id);

        if self.activity_ids.len() == before {
            return false;
        }

        self.update_data(problem);
        true
    }

    /// Removes the jobs of the activities in `positions` (shipments as a
    /// whole). Returns the removed jobs.
    pub fn remove_jobs_at(
        &mut self,
        problem: &VehicleRoutingProblem,
        positions: impl IntoIterator<Item = usize>,
    ) -> Vec<JobIdx> {
        let mut removed = positions
            .into_iter()
            .filter(|&position| position < self.len())
            .map(|position| self.activity_ids[position].job_id())
            .collect::<Vec<_>>();
        removed.sort_unstable();
        removed.dedup();

        if !removed.is_empty() {
            self.activity_ids
                .retain(|activity_id| removed.binary_search(&activity_id.job_id()).is_err());
            self.update_data(problem);
        }

        removed
    }

    fn initial_load(&self, problem: &VehicleRoutingProblem) -> Capacity {
        let mut load = Capacity::with_dimensions(problem.capacity_dimensions());
        for activity_id in &self.activity_ids {
            if let ActivityId::Service(job_id) = activity_id
                && let Job::Service(service) = problem.job(*job_id)
                && service.service_type() == ServiceType::Delivery
            {
                load += service.demand();
            }
        }

        load
    }

    pub(super) fn update_data(&mut self, problem: &VehicleRoutingProblem) {
        let vehicle = problem.vehicle(self.vehicle_id);
        let len = self.activity_ids.len();

        self.jobs.clear();
        self.schedules.clear();
        self.current_load.clear();
        self.fwd_load_peaks.clear();
        self.bwd_load_peaks.clear();

        let mut load = self.initial_load(problem);
        self.current_load.push(load.clone());

        let mut previous_location_id = vehicle.start_location_id();
        let mut previous_departure_time = vehicle.earliest_start();
        let mut distance = 0.0;
        let mut transport_costs = 0.0;
        let mut activity_costs = 0.0;

        for (position, &activity_id) in self.activity_ids.iter().enumerate() {
            self.jobs.insert(activity_id, position);

            let schedule = compute_activity_schedule(
                problem,
                vehicle,
                previous_location_id,
                previous_departure_time,
                activity_id,
            );
            let location_id = problem.task(activity_id).location_id();

            distance += problem.travel_distance(vehicle, previous_location_id, location_id);
            transport_costs += problem.travel_cost(vehicle, previous_location_id, location_id);
            activity_costs += schedule.cost;

            let demand = problem.job(activity_id.job_id()).demand();
            match activity_id {
                ActivityId::Service(job_id) => match problem.service(job_id) {
                    Some(service) if service.service_type() == ServiceType::Delivery => {
                        load -= demand
                    }
                    _ => load += demand,
                },
                ActivityId::ShipmentPickup(_) => load += demand,
                ActivityId::ShipmentDelivery(_) => load -= demand,
            }
            self.current_load.push(load.clone());

            previous_location_id = location_id;
            previous_departure_time = schedule.departure_time;
            self.schedules.push(schedule);
        }

        if len > 0 {
            if let Some(end_location_id) = vehicle.end_location_id() {
                distance += problem.travel_distance(vehicle, previous_location_id, end_location_id);
            }
            transport_costs += leg_cost(
                problem,
                vehicle,
                previous_location_id,
                vehicle.end_location_id(),
            );
            self.end_arrival_time =
                compute_vehicle_end(problem, vehicle, previous_location_id, previous_departure_time);
        } else {
            self.end_arrival_time = vehicle.earliest_start();
        }

        let mut peak = Capacity::with_dimensions(problem.capacity_dimensions());
        for load in &self.current_load {
            peak.update_max(load);
            self.fwd_load_peaks.push(peak.clone());
        }

        let mut peak = Capacity::with_dimensions(problem.capacity_dimensions());
        self.bwd_load_peaks
            .resize(self.current_load.len(), Capacity::EMPTY);
        for (position, load) in self.current_load.iter().enumerate().rev() {
            peak.update_max(load);
            self.bwd_load_peaks[position] = peak.clone();
        }

        self.distance = distance;
        self.transport_costs = transport_costs;
        self.activity_costs = activity_costs;
    }
}
