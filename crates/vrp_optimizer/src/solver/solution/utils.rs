use serde::Serialize;

use crate::problem::{
    job::ActivityId, location::LocationIdx, vehicle::Vehicle,
    vehicle_routing_problem::VehicleRoutingProblem,
};

/// When an activity happens and what performing it costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActivitySchedule {
    pub activity_id: ActivityId,
    pub arrival_time: f64,
    pub start_time: f64,
    pub departure_time: f64,
    pub waiting_duration: f64,
    /// Activity cost plus service and waiting time weighted by the vehicle type.
    pub cost: f64,
}

impl ActivitySchedule {
    pub fn is_on_time(&self, problem: &VehicleRoutingProblem) -> bool {
        problem
            .task(self.activity_id)
            .time_window()
            .is_none_or(|time_window| time_window.is_satisfied(self.arrival_time))
    }

    pub fn overtime(&self, problem: &VehicleRoutingProblem) -> f64 {
        problem
            .task(self.activity_id)
            .time_window()
            .map_or(0.0, |time_window| time_window.overtime(self.arrival_time))
    }
}

pub(crate) fn compute_activity_schedule(
    problem: &VehicleRoutingProblem,
    vehicle: &Vehicle,
    previous_location_id: LocationIdx,
    previous_departure_time: f64,
    activity_id: ActivityId,
) -> ActivitySchedule {
    let activity = problem.tour_activity(activity_id);
    let arrival_time = previous_departure_time
        + problem.travel_time(vehicle, previous_location_id, activity.location_id());

    let start_time = activity
        .time_window()
        .map_or(arrival_time, |time_window| {
            time_window.service_start(arrival_time)
        });
    let waiting_duration = start_time - arrival_time;

    let policy = problem.activity_costs();
    let duration = policy.duration(&activity, arrival_time, vehicle);
    let vehicle_type = vehicle.vehicle_type();

    ActivitySchedule {
        activity_id,
        arrival_time,
        start_time,
        departure_time: start_time + duration,
        waiting_duration,
        cost: policy.cost(&activity, arrival_time, vehicle)
            + duration * vehicle_type.cost_per_service_time()
            + waiting_duration * vehicle_type.cost_per_waiting_time(),
    }
}

/// Arrival at the end location, or the last departure for open routes.
pub(crate) fn compute_vehicle_end(
    problem: &VehicleRoutingProblem,
    vehicle: &Vehicle,
    last_location_id: LocationIdx,
    last_departure_time: f64,
) -> f64 {
    match vehicle.end_location_id() {
        Some(end_location_id) => {
            last_departure_time + problem.travel_time(vehicle, last_location_id, end_location_id)
        }
        None => last_departure_time,
    }
}

/// Transport cost of a leg; legs towards the end of an open route are free.
pub(crate) fn leg_cost(
    problem: &VehicleRoutingProblem,
    vehicle: &Vehicle,
    from: LocationIdx,
    to: Option<LocationIdx>,
) -> f64 {
    to.map_or(0.0, |to| problem.travel_cost(vehicle, from, to))
}
