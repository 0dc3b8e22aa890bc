use serde::{Deserialize, Serialize};

use crate::error::InvalidProblemError;

use super::capacity::Capacity;

/// Capacity and cost coefficients shared by every vehicle of the type.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct VehicleType {
    type_id: String,
    capacity: Capacity,
    fixed_cost: f64,
    cost_per_distance: f64,
    cost_per_transport_time: f64,
    cost_per_service_time: f64,
    cost_per_waiting_time: f64,
}

impl VehicleType {
    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn capacity(&self) -> &Capacity {
        &self.capacity
    }

    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    pub fn cost_per_distance(&self) -> f64 {
        self.cost_per_distance
    }

    pub fn cost_per_transport_time(&self) -> f64 {
        self.cost_per_transport_time
    }

    pub fn cost_per_service_time(&self) -> f64 {
        self.cost_per_service_time
    }

    pub fn cost_per_waiting_time(&self) -> f64 {
        self.cost_per_waiting_time
    }
}

#[derive(Default)]
pub struct VehicleTypeBuilder {
    type_id: Option<String>,
    capacity: Option<Capacity>,
    fixed_cost: Option<f64>,
    cost_per_distance: Option<f64>,
    cost_per_transport_time: Option<f64>,
    cost_per_service_time: Option<f64>,
    cost_per_waiting_time: Option<f64>,
}

impl VehicleTypeBuilder {
    pub fn set_type_id(&mut self, type_id: impl Into<String>) -> &mut VehicleTypeBuilder {
        self.type_id = Some(type_id.into());
        self
    }

    pub fn set_capacity(&mut self, capacity: Capacity) -> &mut VehicleTypeBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_fixed_cost(&mut self, fixed_cost: f64) -> &mut VehicleTypeBuilder {
        self.fixed_cost = Some(fixed_cost);
        self
    }

    pub fn set_cost_per_distance(&mut self, cost: f64) -> &mut VehicleTypeBuilder {
        self.cost_per_distance = Some(cost);
        self
    }

    pub fn set_cost_per_transport_time(&mut self, cost: f64) -> &mut VehicleTypeBuilder {
        self.cost_per_transport_time = Some(cost);
        self
    }

    pub fn set_cost_per_service_time(&mut self, cost: f64) -> &mut VehicleTypeBuilder {
        self.cost_per_service_time = Some(cost);
        self
    }

    pub fn set_cost_per_waiting_time(&mut self, cost: f64) -> &mut VehicleTypeBuilder {
        self.cost_per_waiting_time = Some(cost);
        self
    }

    /// Unset coefficients default to a distance cost of 1 and no other cost.
    pub fn build(self) -> Result<VehicleType, InvalidProblemError> {
        Ok(VehicleType {
            type_id: self.type_id.ok_or(InvalidProblemError::MissingField {
                entity: "vehicle type",
                field: "type_id",
            })?,
            capacity: self.capacity.unwrap_or_default(),
            fixed_cost: self.fixed_cost.unwrap_or(0.0),
            cost_per_distance: self.cost_per_distance.unwrap_or(1.0),
            cost_per_transport_time: self.cost_per_transport_time.unwrap_or(0.0),
            cost_per_service_time: self.cost_per_service_time.unwrap_or(0.0),
            cost_per_waiting_time: self.cost_per_waiting_time.unwrap_or(0.0),
        })
    }
}
