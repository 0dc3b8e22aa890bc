use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Static weights of a set of strategies, used for a weighted random draw each
/// iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyWeights<S> {
    weights: Vec<WeightedStrategy<S>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedStrategy<S> {
    pub strategy: S,
    pub weight: f64,
}

impl<S> StrategyWeights<S>
where
    S: Copy,
{
    pub fn new(weights: Vec<(S, f64)>) -> Self {
        StrategyWeights {
            weights: weights
                .into_iter()
                .map(|(strategy, weight)| WeightedStrategy {
                    strategy,
                    weight: weight.max(0.0),
                })
                .collect(),
        }
    }

    /// `None` when no strategy has a positive weight.
    pub fn select_strategy<R>(&self, rng: &mut R) -> Option<S>
    where
        R: rand::Rng,
    {
        self.weights
            .choose_weighted(rng, |entry| entry.weight)
            .ok()
            .map(|entry| entry.strategy)
    }
}
