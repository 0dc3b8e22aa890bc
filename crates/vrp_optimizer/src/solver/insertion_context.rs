use std::cell::OnceCell;

use crate::{
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    solver::solution::{
        route::WorkingSolutionRoute,
        utils::{ActivitySchedule, compute_activity_schedule, compute_vehicle_end},
    },
};

use super::{insertion::Insertion, solution::working_solution::WorkingSolution};

/// Schedule of the route tail once the insertion is applied, starting at
/// [`Insertion::first_position`].
pub struct SimulatedTail {
    pub schedules: Vec<ActivitySchedule>,
    pub end_arrival_time: f64,
}

pub struct InsertionContext<'a> {
    pub problem: &'a VehicleRoutingProblem,
    pub solution: &'a WorkingSolution,
    pub insertion: &'a Insertion,
    tail: OnceCell<SimulatedTail>,
}

impl<'a> InsertionContext<'a> {
    pub fn new(
        problem: &'a VehicleRoutingProblem,
        solution: &'a WorkingSolution,
        insertion: &'a Insertion,
    ) -> Self {
        InsertionContext {
            problem,
            solution,
            insertion,
            tail: OnceCell::new(),
        }
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        self.problem
    }

    pub fn route(&self) -> &WorkingSolutionRoute {
        self.insertion.route(self.solution)
    }

    /// Shared by every constraint looking at the shifted schedule, so the
    /// simulation runs at most once per candidate.
    pub fn simulated_tail(&self) -> &SimulatedTail {
        self.tail.get_or_init(|| self.simulate_tail())
    }

    fn simulate_tail(&self) -> SimulatedTail {
        let route = self.route();
        let vehicle = route.vehicle(self.problem);
        let first_position = self.insertion.first_position();

        let mut previous_location_id = route.previous_location_id(self.problem, first_position);
        let mut previous_departure_time = route.previous_departure_time(self.problem, first_position);

        let activity_ids = self.insertion.updated_activity_ids(route);
        let mut schedules = Vec::with_capacity(activity_ids.len());
        for activity_id in activity_ids {
            let schedule = compute_activity_schedule(
                self.problem,
                vehicle,
                previous_location_id,
                previous_departure_time,
                activity_id,
            );

            previous_location_id = self.problem.task(activity_id).location_id();
            previous_departure_time = schedule.departure_time;
            schedules.push(schedule);
        }

        SimulatedTail {
            schedules,
            end_arrival_time: compute_vehicle_end(
                self.problem,
                vehicle,
                previous_location_id,
                previous_departure_time,
            ),
        }
    }
}
