use std::sync::Arc;

use crate::problem::location::LocationIdx;

use super::{location::Location, vehicle::Vehicle};

pub type Distance = f64;
pub type Time = f64;

/// Travel distance and time between two locations for a given vehicle.
pub trait TransportCosts: Send + Sync {
    fn distance(&self, from: LocationIdx, to: LocationIdx, vehicle: &Vehicle) -> Distance;

    fn travel_time(&self, from: LocationIdx, to: LocationIdx, vehicle: &Vehicle) -> Time;

    /// Cost of driving `from -> to`, weighted by the vehicle type coefficients.
    fn transport_cost(&self, from: LocationIdx, to: LocationIdx, vehicle: &Vehicle) -> f64 {
        let vehicle_type = vehicle.vehicle_type();
        self.distance(from, to, vehicle) * vehicle_type.cost_per_distance()
            + self.travel_time(from, to, vehicle) * vehicle_type.cost_per_transport_time()
    }

    fn num_locations(&self) -> usize;
}

/// Flat distance and time matrices shared by every vehicle.
/// The value for a pair lives at `from * num_locations + to`.
#[derive(Clone)]
pub struct TravelMatrices {
    distances: Arc<Vec<Distance>>,
    times: Arc<Vec<Time>>,
    num_locations: usize,
}

impl TravelMatrices {
    pub fn new(distances: Vec<Vec<Distance>>, times: Vec<Vec<Time>>) -> Self {
        let num_locations = distances.len();

        TravelMatrices {
            distances: Arc::new(distances.into_iter().flatten().collect()),
            times: Arc::new(times.into_iter().flatten().collect()),
            num_locations,
        }
    }

    /// Crow-fly distances; travel time equals distance.
    pub fn from_euclidean(locations: &[Location]) -> Self {
        let num_locations = locations.len();
        let mut distances: Vec<Distance> = vec![0.0; num_locations * num_locations];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                distances[i * num_locations + j] = from.euclidean_distance(to);
            }
        }

        let distances = Arc::new(distances);
        let times = Arc::clone(&distances);

        TravelMatrices {
            distances,
            times,
            num_locations,
        }
    }

    #[inline(always)]
    fn index(&self, from: LocationIdx, to: LocationIdx) -> usize {
        from.get() * self.num_locations + to.get()
    }

    #[inline]
    pub fn travel_distance(&self, from: LocationIdx, to: LocationIdx) -> Distance {
        self.distances[self.index(from, to)]
    }

    #[inline]
    pub fn travel_time(&self, from: LocationIdx, to: LocationIdx) -> Time {
        self.times[self.index(from, to)]
    }
}

impl TransportCosts for TravelMatrices {
    fn distance(&self, from: LocationIdx, to: LocationIdx, _vehicle: &Vehicle) -> Distance {
        self.travel_distance(from, to)
    }

    fn travel_time(&self, from: LocationIdx, to: LocationIdx, _vehicle: &Vehicle) -> Time {
        TravelMatrices::travel_time(self, from, to)
    }

    fn num_locations(&self) -> usize {
        self.num_locations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_euclidean() {
        let locations = vec![
            Location::from_cartesian(0.0, 0.0),
            Location::from_cartesian(3.0, 4.0),
            Location::from_cartesian(6.0, 8.0),
        ];
        let matrices = TravelMatrices::from_euclidean(&locations);

        assert_eq!(
            matrices.travel_distance(LocationIdx::new(0), LocationIdx::new(1)),
            5.0
        );
        assert_eq!(
            matrices.travel_distance(LocationIdx::new(2), LocationIdx::new(0)),
            10.0
        );
        assert_eq!(
            matrices.travel_time(LocationIdx::new(1), LocationIdx::new(2)),
            5.0
        );
    }

    #[test]
    fn test_new_flattens_rows() {
        let matrices = TravelMatrices::new(
            vec![vec![0.0, 2.0], vec![3.0, 0.0]],
            vec![vec![0.0, 20.0], vec![30.0, 0.0]],
        );

        assert_eq!(
            matrices.travel_distance(LocationIdx::new(1), LocationIdx::new(0)),
            3.0
        );
        assert_eq!(
            matrices.travel_time(LocationIdx::new(0), LocationIdx::new(1)),
            20.0
        );
        assert_eq!(TransportCosts::num_locations(&matrices), 2);
    }
}
