use std::sync::Arc;

use fxhash::FxHashSet;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};

use crate::{
    error::InvalidProblemError,
    problem::{
        fleet::FleetSize,
        job::JobIdx,
        vehicle::VehicleIdx,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        insertion::Insertion,
        solution::{route::WorkingSolutionRoute, route_id::RouteIdx},
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// A route handed to the solver before the search starts. Jobs are visited in
/// order; a shipment contributes its pickup immediately followed by its
/// delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialRoute {
    pub vehicle: VehicleIdx,
    pub jobs: Vec<JobIdx>,
}

/// Routes plus unassigned jobs. Cloning is a deep copy; only the problem is
/// shared.
///
/// In an infinite fleet every vehicle acts as a template: the solution always
/// holds exactly one empty route per vehicle so that insertion can open a new
/// route of any type.
#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<VehicleRoutingProblem>,
    fleet_size: FleetSize,
    routes: Vec<WorkingSolutionRoute>,
    unassigned_jobs: FxHashSet<JobIdx>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<VehicleRoutingProblem>, fleet_size: FleetSize) -> Self {
        let routes = problem
            .vehicles()
            .iter()
            .enumerate_idx()
            .map(|(vehicle_id, _)| WorkingSolutionRoute::empty(&problem, vehicle_id))
            .collect::<Vec<_>>();
        let unassigned_jobs = problem.job_ids().collect();

        WorkingSolution {
            problem,
            fleet_size,
            routes,
            unassigned_jobs,
        }
    }

    /// Builds a partial solution from caller-supplied routes. Jobs not
    /// mentioned stay unassigned.
    pub fn from_routes(
        problem: Arc<VehicleRoutingProblem>,
        fleet_size: FleetSize,
        initial_routes: &[InitialRoute],
    ) -> Result<Self, InvalidProblemError> {
        let mut solution = WorkingSolution::new(problem, fleet_size);
        let mut used_vehicles = FxHashSet::default();
        let mut assigned_jobs = FxHashSet::default();

        for initial_route in initial_routes {
            let vehicle_id = initial_route.vehicle;
            if vehicle_id.get() >= solution.problem.vehicles().len() {
                return Err(InvalidProblemError::UnknownVehicle(vehicle_id.get()));
            }

            if !used_vehicles.insert(vehicle_id) && !fleet_size.is_infinite() {
                return Err(InvalidProblemError::VehicleUsedTwice(vehicle_id.get()));
            }

            let mut activity_ids = Vec::new();
            for &job_id in &initial_route.jobs {
                if job_id.get() >= solution.problem.jobs().len() {
                    return Err(InvalidProblemError::UnknownJob(job_id.get()));
                }

                if !assigned_jobs.insert(job_id) {
                    return Err(InvalidProblemError::JobAssignedTwice(job_id.get()));
                }

                activity_ids.extend(solution.problem.job(job_id).activity_ids(job_id));
            }

            if activity_ids.is_empty() {
                continue;
            }

            let Some(route_id) = solution.empty_route_of_vehicle(vehicle_id) else {
                return Err(InvalidProblemError::VehicleUsedTwice(vehicle_id.get()));
            };

            let problem = Arc::clone(&solution.problem);
            let route = &mut solution.routes[route_id];
            route.activity_ids = activity_ids;
            route.update_data(&problem);

            if !route.is_feasible(&problem) {
                return Err(InvalidProblemError::InfeasibleRoute {
                    vehicle: vehicle_id.get(),
                });
            }

            for job_id in &initial_route.jobs {
                solution.unassigned_jobs.remove(job_id);
            }

            solution.create_additional_route(vehicle_id);
        }

        Ok(solution)
    }

    fn empty_route_of_vehicle(&self, vehicle_id: VehicleIdx) -> Option<RouteIdx> {
        self.routes
            .iter()
            .enumerate_idx()
            .find(|(_, route)| route.vehicle_id == vehicle_id && route.is_empty())
            .map(|(route_id, _)| route_id)
    }

    fn create_additional_route(&mut self, vehicle_id: VehicleIdx) {
        if !self.fleet_size.is_infinite() || self.empty_route_of_vehicle(vehicle_id).is_some() {
            return;
        }

        self.routes
            .push(WorkingSolutionRoute::empty(&self.problem, vehicle_id));
    }

    /// Drops surplus empty routes left behind by removals. Route ids are not
    /// stable across this call.
    pub fn compact_routes(&mut self) {
        if !self.fleet_size.is_infinite() {
            return;
        }

        let mut seen_empty = FxHashSet::default();
        self.routes
            .retain(|route| !route.is_empty() || seen_empty.insert(route.vehicle_id));
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        self.problem.as_ref()
    }

    pub fn fleet_size(&self) -> FleetSize {
        self.fleet_size
    }

    pub fn is_empty(&self) -> bool {
        self.unassigned_jobs.len() == self.problem.jobs().len()
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned_jobs.is_empty()
    }

    pub fn is_unassigned(&self, job_id: JobIdx) -> bool {
        self.unassigned_jobs.contains(&job_id)
    }

    pub fn unassigned_jobs(&self) -> &FxHashSet<JobIdx> {
        &self.unassigned_jobs
    }

    /// Unassigned jobs in ascending index order.
    pub fn sorted_unassigned_jobs(&self) -> Vec<JobIdx> {
        let mut jobs = self.unassigned_jobs.iter().copied().collect::<Vec<_>>();
        jobs.sort_unstable();
        jobs
    }

    pub fn assigned_jobs_count(&self) -> usize {
        self.problem.jobs().len() - self.unassigned_jobs.len()
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route_ids(&self) -> impl Iterator<Item = RouteIdx> + use<> {
        (0..self.routes.len()).map(RouteIdx::new)
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub fn non_empty_routes_iter(&self) -> impl Iterator<Item = &WorkingSolutionRoute> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    pub fn non_empty_routes_count(&self) -> usize {
        self.non_empty_routes_iter().count()
    }

    /// Difference in activities between the longest and the shortest used
    /// route.
    pub fn route_balance(&self) -> usize {
        let (min, max) = self
            .non_empty_routes_iter()
            .fold((usize::MAX, 0), |(min, max), route| {
                (min.min(route.len()), max.max(route.len()))
            });

        max.saturating_sub(min)
    }

    pub fn total_cost(&self) -> f64 {
        self.non_empty_routes_iter()
            .map(|route| route.total_cost(&self.problem))
            .sum()
    }

    pub fn total_distance(&self) -> f64 {
        self.non_empty_routes_iter().map(|route| route.distance()).sum()
    }

    pub fn random_assigned_job<R>(&self, rng: &mut R) -> Option<JobIdx>
    where
        R: rand::Rng,
    {
        self.non_empty_routes_iter()
            .flat_map(|route| route.job_ids())
            .choose(rng)
    }

    pub fn route_of_job(&self, job_id: JobIdx) -> Option<RouteIdx> {
        self.routes
            .iter()
            .enumerate_idx()
            .find(|(_, route)| route.contains_job(job_id))
            .map(|(route_id, _)| route_id)
    }

    /// Two solutions are identical when their used routes visit the same
    /// activities with the same vehicles, in the same order.
    pub fn is_identical(&self, other: &WorkingSolution) -> bool {
        let mut routes = self.non_empty_routes_iter();
        let mut other_routes = other.non_empty_routes_iter();

        loop {
            match (routes.next(), other_routes.next()) {
                (None, None) => return true,
                (Some(route), Some(other_route)) => {
                    if route.vehicle_id != other_route.vehicle_id
                        || route.activity_ids != other_route.activity_ids
                    {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    pub fn insert(&mut self, insertion: &Insertion) {
        let route = &mut self.routes[insertion.route_id()];
        let was_empty = route.is_empty();
        let vehicle_id = route.vehicle_id;

        route.insert(&self.problem, insertion);
        self.unassigned_jobs.remove(&insertion.job_idx());

        if was_empty {
            self.create_additional_route(vehicle_id);
        }
    }

    pub fn remove_job(&mut self, job_id: JobIdx) -> bool {
        let Some(route_id) = self.route_of_job(job_id) else {
            return false;
        };

        let removed = self.routes[route_id].remove_job(&self.problem, job_id);
        if removed {
            self.unassigned_jobs.insert(job_id);
        }

        removed
    }

    /// Removes the jobs owning the activities at `positions` of a route.
    pub fn remove_route_activities(
        &mut self,
        route_id: RouteIdx,
        positions: impl IntoIterator<Item = usize>,
    ) -> Vec<JobIdx> {
        let removed = self.routes[route_id].remove_jobs_at(&self.problem, positions);
        self.unassigned_jobs.extend(removed.iter().copied());
        removed
    }
}
