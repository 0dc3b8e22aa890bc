use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{define_index_newtype, error::InvalidProblemError};

use super::{capacity::Capacity, location::LocationIdx, vehicle_type::VehicleType};

define_index_newtype!(VehicleIdx, Vehicle);

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Vehicle {
    external_id: String,
    vehicle_type: Arc<VehicleType>,
    start_location_id: LocationIdx,
    end_location_id: Option<LocationIdx>,
    earliest_start: f64,
    latest_end: Option<f64>,
}

impl Vehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn vehicle_type(&self) -> &VehicleType {
        &self.vehicle_type
    }

    pub fn capacity(&self) -> &Capacity {
        self.vehicle_type.capacity()
    }

    pub fn start_location_id(&self) -> LocationIdx {
        self.start_location_id
    }

    /// `None` for open routes that end at the last activity.
    pub fn end_location_id(&self) -> Option<LocationIdx> {
        self.end_location_id
    }

    pub fn earliest_start(&self) -> f64 {
        self.earliest_start
    }

    pub fn latest_end(&self) -> Option<f64> {
        self.latest_end
    }
}

pub struct VehicleBuilder {
    external_id: Option<String>,
    vehicle_type: Option<Arc<VehicleType>>,
    start_location_id: Option<LocationIdx>,
    end_location_id: Option<LocationIdx>,
    return_to_start: bool,
    earliest_start: Option<f64>,
    latest_end: Option<f64>,
}

impl Default for VehicleBuilder {
    fn default() -> Self {
        VehicleBuilder {
            external_id: None,
            vehicle_type: None,
            start_location_id: None,
            end_location_id: None,
            return_to_start: true,
            earliest_start: None,
            latest_end: None,
        }
    }
}

impl VehicleBuilder {
    pub fn set_external_id(&mut self, external_id: impl Into<String>) -> &mut VehicleBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_vehicle_type(&mut self, vehicle_type: Arc<VehicleType>) -> &mut VehicleBuilder {
        self.vehicle_type = Some(vehicle_type);
        self
    }

    pub fn set_start_location_id(
        &mut self,
        location_id: impl Into<LocationIdx>,
    ) -> &mut VehicleBuilder {
        self.start_location_id = Some(location_id.into());
        self
    }

    pub fn set_end_location_id(
        &mut self,
        location_id: impl Into<LocationIdx>,
    ) -> &mut VehicleBuilder {
        self.end_location_id = Some(location_id.into());
        self
    }

    /// Without an explicit end location, whether the route returns to its start.
    pub fn set_return_to_start(&mut self, return_to_start: bool) -> &mut VehicleBuilder {
        self.return_to_start = return_to_start;
        self
    }

    pub fn set_earliest_start(&mut self, earliest_start: f64) -> &mut VehicleBuilder {
        self.earliest_start = Some(earliest_start);
        self
    }

    pub fn set_latest_end(&mut self, latest_end: f64) -> &mut VehicleBuilder {
        self.latest_end = Some(latest_end);
        self
    }

    pub fn build(self) -> Result<Vehicle, InvalidProblemError> {
        let missing = |field| InvalidProblemError::MissingField {
            entity: "vehicle",
            field,
        };

        let start_location_id = self
            .start_location_id
            .ok_or_else(|| missing("start_location_id"))?;

        let end_location_id = match self.end_location_id {
            Some(end) => Some(end),
            None if self.return_to_start => Some(start_location_id),
            None => None,
        };

        Ok(Vehicle {
            external_id: self.external_id.ok_or_else(|| missing("external_id"))?,
            vehicle_type: self.vehicle_type.ok_or_else(|| missing("vehicle_type"))?,
            start_location_id,
            end_location_id,
            earliest_start: self.earliest_start.unwrap_or(0.0),
            latest_end: self.latest_end,
        })
    }
}
