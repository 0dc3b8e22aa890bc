use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    define_index_newtype,
    error::InvalidProblemError,
    problem::{capacity::Capacity, location::LocationIdx, time_window::TimeWindow},
};

define_index_newtype!(JobIdx, Job);

/// Identifies one visit of a route. Services have one visit, shipments two.
#[derive(Hash, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActivityId {
    Service(JobIdx),
    ShipmentPickup(JobIdx),
    ShipmentDelivery(JobIdx),
}

impl ActivityId {
    pub fn service(idx: impl Into<JobIdx>) -> Self {
        ActivityId::Service(idx.into())
    }

    pub fn shipment_pickup(idx: impl Into<JobIdx>) -> Self {
        ActivityId::ShipmentPickup(idx.into())
    }

    pub fn shipment_delivery(idx: impl Into<JobIdx>) -> Self {
        ActivityId::ShipmentDelivery(idx.into())
    }

    pub fn is_shipment(&self) -> bool {
        matches!(
            self,
            ActivityId::ShipmentPickup(_) | ActivityId::ShipmentDelivery(_)
        )
    }

    pub fn job_id(&self) -> JobIdx {
        match self {
            ActivityId::Service(id)
            | ActivityId::ShipmentPickup(id)
            | ActivityId::ShipmentDelivery(id) => *id,
        }
    }
}

impl Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityId::Service(id) => write!(f, "Service({id})"),
            ActivityId::ShipmentPickup(id) => write!(f, "ShipmentPickup({id})"),
            ActivityId::ShipmentDelivery(id) => write!(f, "ShipmentDelivery({id})"),
        }
    }
}

impl From<ActivityId> for JobIdx {
    fn from(activity_id: ActivityId) -> Self {
        activity_id.job_id()
    }
}

/// Where and how long a vehicle stops for one activity.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Task {
    location_id: LocationIdx,
    service_duration: f64,
    time_window: Option<TimeWindow>,
}

impl Task {
    pub fn new(
        location_id: LocationIdx,
        service_duration: f64,
        time_window: Option<TimeWindow>,
    ) -> Self {
        Task {
            location_id,
            service_duration,
            time_window,
        }
    }

    pub fn location_id(&self) -> LocationIdx {
        self.location_id
    }

    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    pub fn has_time_window(&self) -> bool {
        self.time_window.is_some_and(|tw| !tw.is_empty())
    }
}

#[derive(Deserialize, Serialize, Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ServiceType {
    /// Loaded on the vehicle at the visit.
    #[default]
    Pickup,
    /// Loaded at the start of the route, unloaded at the visit.
    Delivery,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Service {
    external_id: String,
    task: Task,
    demand: Capacity,
    service_type: ServiceType,
}

impl Service {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn location_id(&self) -> LocationIdx {
        self.task.location_id
    }

    pub fn demand(&self) -> &Capacity {
        &self.demand
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }
}

#[derive(Default)]
pub struct ServiceBuilder {
    external_id: Option<String>,
    location_id: Option<LocationIdx>,
    time_window: Option<TimeWindow>,
    demand: Option<Capacity>,
    service_duration: Option<f64>,
    service_type: Option<ServiceType>,
}

impl ServiceBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut ServiceBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_location_id(&mut self, location_id: impl Into<LocationIdx>) -> &mut ServiceBuilder {
        self.location_id = Some(location_id.into());
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut ServiceBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn set_demand(&mut self, demand: Capacity) -> &mut ServiceBuilder {
        self.demand = Some(demand);
        self
    }

    pub fn set_service_duration(&mut self, service_duration: f64) -> &mut ServiceBuilder {
        self.service_duration = Some(service_duration);
        self
    }

    pub fn set_service_type(&mut self, service_type: ServiceType) -> &mut ServiceBuilder {
        self.service_type = Some(service_type);
        self
    }

    pub fn build(self) -> Result<Service, InvalidProblemError> {
        let external_id = self.external_id.ok_or(InvalidProblemError::MissingField {
            entity: "service",
            field: "external_id",
        })?;
        let location_id = self.location_id.ok_or(InvalidProblemError::MissingField {
            entity: "service",
            field: "location_id",
        })?;

        Ok(Service {
            external_id,
            task: Task::new(
                location_id,
                self.service_duration.unwrap_or(0.0),
                self.time_window,
            ),
            demand: self.demand.unwrap_or_default(),
            service_type: self.service_type.unwrap_or_default(),
        })
    }
}

/// A load carried from a pickup task to a delivery task by the same vehicle.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Shipment {
    external_id: String,
    pickup: Task,
    delivery: Task,
    demand: Capacity,
}

impl Shipment {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn pickup(&self) -> &Task {
        &self.pickup
    }

    pub fn delivery(&self) -> &Task {
        &self.delivery
    }

    pub fn demand(&self) -> &Capacity {
        &self.demand
    }
}

#[derive(Default)]
pub struct ShipmentBuilder {
    external_id: Option<String>,
    pickup: Option<Task>,
    delivery: Option<Task>,
    demand: Option<Capacity>,
}

impl ShipmentBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut ShipmentBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_pickup(&mut self, pickup: Task) -> &mut ShipmentBuilder {
        self.pickup = Some(pickup);
        self
    }

    pub fn set_delivery(&mut self, delivery: Task) -> &mut ShipmentBuilder {
        self.delivery = Some(delivery);
        self
    }

    pub fn set_demand(&mut self, demand: Capacity) -> &mut ShipmentBuilder {
        self.demand = Some(demand);
        self
    }

    pub fn build(self) -> Result<Shipment, InvalidProblemError> {
        let missing = |field| InvalidProblemError::MissingField {
            entity: "shipment",
            field,
        };

        Ok(Shipment {
            external_id: self.external_id.ok_or_else(|| missing("external_id"))?,
            pickup: self.pickup.ok_or_else(|| missing("pickup"))?,
            delivery: self.delivery.ok_or_else(|| missing("delivery"))?,
            demand: self.demand.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Job {
    Service(Service),
    Shipment(Shipment),
}

impl Job {
    pub fn external_id(&self) -> &str {
        match self {
            Job::Service(service) => service.external_id(),
            Job::Shipment(shipment) => shipment.external_id(),
        }
    }

    pub fn demand(&self) -> &Capacity {
        match self {
            Job::Service(service) => service.demand(),
            Job::Shipment(shipment) => shipment.demand(),
        }
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        let (first, second) = match self {
            Job::Service(service) => (service.task(), None),
            Job::Shipment(shipment) => (shipment.pickup(), Some(shipment.delivery())),
        };

        std::iter::once(first).chain(second)
    }

    /// Activity ids of this job in route order.
    pub fn activity_ids(&self, job_id: JobIdx) -> impl Iterator<Item = ActivityId> {
        let (first, second) = match self {
            Job::Service(_) => (ActivityId::Service(job_id), None),
            Job::Shipment(_) => (
                ActivityId::ShipmentPickup(job_id),
                Some(ActivityId::ShipmentDelivery(job_id)),
            ),
        };

        std::iter::once(first).chain(second)
    }

    pub fn has_time_windows(&self) -> bool {
        self.tasks().any(Task::has_time_window)
    }

    pub fn is_shipment(&self) -> bool {
        matches!(self, Job::Shipment(_))
    }
}

impl From<Service> for Job {
    fn from(service: Service) -> Self {
        Job::Service(service)
    }
}

impl From<Shipment> for Job {
    fn from(shipment: Shipment) -> Self {
        Job::Shipment(shipment)
    }
}
