use std::iter;

use crate::{
    problem::job::{ActivityId, Job, JobIdx},
    solver::solution::{
        route::WorkingSolutionRoute, route_id::RouteIdx, working_solution::WorkingSolution,
    },
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceInsertion {
    pub route_id: RouteIdx,
    pub job_index: JobIdx,
    /// Index of the activity the service is inserted before.
    pub position: usize,
}

impl ServiceInsertion {
    pub fn activity_id(&self) -> ActivityId {
        ActivityId::Service(self.job_index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShipmentInsertion {
    pub route_id: RouteIdx,
    pub job_index: JobIdx,

    /// Index of the activity the pickup is inserted before.
    pub pickup_position: usize,

    /// Index, in the route before insertion, of the activity the delivery is
    /// inserted before. Always `>= pickup_position`.
    pub delivery_position: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Insertion {
    Service(ServiceInsertion),
    Shipment(ShipmentInsertion),
}

impl Insertion {
    pub fn job_idx(&self) -> JobIdx {
        match self {
            Insertion::Service(ctx) => ctx.job_index,
            Insertion::Shipment(ctx) => ctx.job_index,
        }
    }

    pub fn route_id(&self) -> RouteIdx {
        match self {
            Insertion::Service(ctx) => ctx.route_id,
            Insertion::Shipment(ctx) => ctx.route_id,
        }
    }

    pub fn route<'a>(&self, solution: &'a WorkingSolution) -> &'a WorkingSolutionRoute {
        solution.route(self.route_id())
    }

    /// First route position changed by the insertion.
    pub fn first_position(&self) -> usize {
        match self {
            Insertion::Service(ctx) => ctx.position,
            Insertion::Shipment(ctx) => ctx.pickup_position,
        }
    }

    /// Activity ids of the route from [`Insertion::first_position`] to the end,
    /// once the insertion is applied.
    pub fn updated_activity_ids(&self, route: &WorkingSolutionRoute) -> Vec<ActivityId> {
        let activity_ids = route.activity_ids();

        match *self {
            Insertion::Service(ServiceInsertion {
                job_index,
                position,
                ..
            }) => iter::once(ActivityId::Service(job_index))
                .chain(activity_ids[position..].iter().copied())
                .collect(),
            Insertion::Shipment(ShipmentInsertion {
                job_index,
                pickup_position,
                delivery_position,
                ..
            }) => iter::once(ActivityId::ShipmentPickup(job_index))
                .chain(activity_ids[pickup_position..delivery_position].iter().copied())
                .chain(iter::once(ActivityId::ShipmentDelivery(job_index)))
                .chain(activity_ids[delivery_position..].iter().copied())
                .collect(),
        }
    }
}

pub fn for_each_insertion(
    solution: &WorkingSolution,
    job_index: JobIdx,
    mut f: impl FnMut(Insertion),
) {
    for route_id in solution.route_ids() {
        for_each_route_insertion(solution, route_id, job_index, &mut f);
    }
}

pub fn for_each_route_insertion(
    solution: &WorkingSolution,
    route_id: RouteIdx,
    job_index: JobIdx,
    mut f: impl FnMut(Insertion),
) {
    let route = solution.route(route_id);

    match solution.problem().job(job_index) {
        Job::Service(_) => {
            for position in 0..=route.len() {
                f(Insertion::Service(ServiceInsertion {
                    route_id,
                    job_index,
                    position,
                }));
            }
        }
        Job::Shipment(_) => {
            for pickup_position in 0..=route.len() {
                for delivery_position in pickup_position..=route.len() {
                    f(Insertion::Shipment(ShipmentInsertion {
                        route_id,
                        job_index,
                        pickup_position,
                        delivery_position,
                    }));
                }
            }
        }
    }
}
