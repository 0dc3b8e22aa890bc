use std::ops::{Add, AddAssign, Index, Sub, SubAssign};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

type Vector = SmallVec<[f64; 2]>;

/// A multi-dimensional amount: vehicle capacity, job demand or route load.
///
/// Missing dimensions read as `0.0`, so amounts of different lengths can be
/// combined. Dimension consistency across the problem is checked once when
/// the problem is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Capacity(Vector);

impl Capacity {
    pub const EMPTY: Capacity = Capacity(Vector::new_const());

    pub fn with_dimensions(dimensions: usize) -> Self {
        let mut vec = Vector::with_capacity(dimensions);
        vec.resize(dimensions, 0.0);
        Capacity(vec)
    }

    pub fn from_vec(vec: Vec<f64>) -> Self {
        Capacity(SmallVec::from_vec(vec))
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    /// True when every dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&value| value == 0.0)
    }

    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        self.0.get(index).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Componentwise maximum with `other`.
    pub fn update_max(&mut self, other: &Capacity) {
        let len = self.0.len().max(other.0.len());
        self.0.resize(len, 0.0);
        for i in 0..len {
            self.0[i] = self.0[i].max(other.get(i));
        }
    }

    pub fn satisfies_demand(&self, demand: &Capacity) -> bool {
        let len = self.0.len().max(demand.0.len());
        (0..len).all(|i| demand.get(i) <= self.get(i))
    }

    /// Sum over dimensions of how much `demand` exceeds this capacity.
    pub fn over_capacity_demand(&self, demand: &Capacity) -> f64 {
        let len = self.0.len().max(demand.0.len());
        (0..len)
            .map(|i| (demand.get(i) - self.get(i)).max(0.0))
            .sum()
    }

    fn zip_with(&self, other: &Capacity, op: impl Fn(f64, f64) -> f64) -> Capacity {
        let len = self.0.len().max(other.0.len());
        Capacity((0..len).map(|i| op(self.get(i), other.get(i))).collect())
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Index<usize> for Capacity {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Add<&Capacity> for &Capacity {
    type Output = Capacity;

    fn add(self, rhs: &Capacity) -> Self::Output {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub<&Capacity> for &Capacity {
    type Output = Capacity;

    fn sub(self, rhs: &Capacity) -> Self::Output {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl AddAssign<&Capacity> for Capacity {
    fn add_assign(&mut self, rhs: &Capacity) {
        if self.0.len() < rhs.0.len() {
            self.0.resize(rhs.0.len(), 0.0);
        }
        for (i, value) in rhs.0.iter().enumerate() {
            self.0[i] += value;
        }
    }
}

impl SubAssign<&Capacity> for Capacity {
    fn sub_assign(&mut self, rhs: &Capacity) {
        if self.0.len() < rhs.0.len() {
            self.0.resize(rhs.0.len(), 0.0);
        }
        for (i, value) in rhs.0.iter().enumerate() {
            self.0[i] -= value;
        }
    }
}
