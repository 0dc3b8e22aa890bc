use serde::{Deserialize, Serialize};

use crate::define_index_newtype;

define_index_newtype!(LocationIdx, Location);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    x: f64,
    y: f64,
}

impl Location {
    pub fn from_cartesian(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn euclidean_distance(&self, to: &Location) -> f64 {
        let delta_x = self.x - to.x;
        let delta_y = self.y - to.y;
        (delta_x * delta_x + delta_y * delta_y).sqrt()
    }
}

impl From<&Location> for [f64; 2] {
    fn from(location: &Location) -> Self {
        [location.x, location.y]
    }
}
