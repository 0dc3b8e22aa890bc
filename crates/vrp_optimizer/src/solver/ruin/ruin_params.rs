use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RuinParams {
    /// Lower bound of the share of assigned jobs removed per iteration.
    pub min_ratio: f64,
    /// Upper bound of the share of assigned jobs removed per iteration.
    pub max_ratio: f64,
    pub max_ruin_size: usize,
    /// Longest string of consecutive activities removed by the string ruin.
    pub max_string_length: usize,
}

impl Default for RuinParams {
    fn default() -> Self {
        RuinParams {
            min_ratio: 0.1,
            max_ratio: 0.4,
            max_ruin_size: 30,
            max_string_length: 10,
        }
    }
}

impl RuinParams {
    /// Draws the number of jobs to remove, uniformly in
    /// `[ceil(min_ratio * assigned), ceil(max_ratio * assigned)]`, capped by
    /// `max_ruin_size` and by the assigned count.
    pub fn num_jobs_to_remove<R>(&self, assigned_jobs: usize, rng: &mut R) -> usize
    where
        R: Rng,
    {
        if assigned_jobs == 0 {
            return 0;
        }

        let min_ratio = self.min_ratio.clamp(0.0, 1.0);
        let max_ratio = self.max_ratio.clamp(min_ratio, 1.0);

        let min = (min_ratio * assigned_jobs as f64).ceil() as usize;
        let max = (max_ratio * assigned_jobs as f64).ceil() as usize;

        rng.random_range(min..=max)
            .min(self.max_ruin_size)
            .min(assigned_jobs)
    }
}
