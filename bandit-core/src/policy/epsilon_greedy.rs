//! Epsilon-greedy policy.
use super::{argmax_set, choose};
use crate::{error::BanditError, ArmStats, Configurable, Policy};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration of [`EpsilonGreedy`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct EpsilonGreedyConfig {
    /// Probability of exploration, in `[0, 1)`.
    pub epsilon: f64,
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self { epsilon: 0.1 }
    }
}

impl EpsilonGreedyConfig {
    /// Sets the probability of exploration.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.epsilon = v;
        self
    }

    /// Configuration of the greedy policy.
    pub fn greedy() -> Self {
        Self { epsilon: 0.0 }
    }
}

/// Epsilon-greedy policy.
///
/// With probability `1 - epsilon` the arm with the largest value estimate is pulled.
/// Otherwise one of the arms whose estimate is strictly lower than the largest one is
/// pulled, unless all estimates are equal.
#[derive(Debug, Clone)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    /// The greedy policy, i.e., epsilon-greedy with `epsilon = 0`.
    pub fn greedy() -> Self {
        Self { epsilon: 0.0 }
    }

    /// Probability of exploration.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Configurable for EpsilonGreedy {
    type Config = EpsilonGreedyConfig;

    fn build(config: Self::Config) -> Result<Self, BanditError> {
        // The negated form also rejects NaN
        if !(0.0..1.0).contains(&config.epsilon) {
            return Err(BanditError::InvalidConfiguration(format!(
                "epsilon must be in [0, 1), got {}",
                config.epsilon
            )));
        }
        Ok(Self {
            epsilon: config.epsilon,
        })
    }
}

impl Policy for EpsilonGreedy {
    fn pick_arm<R: Rng + ?Sized>(&mut self, stats: &ArmStats, rng: &mut R) -> usize {
        let best = argmax_set(&stats.values);
        let ix = choose(&best, rng);

        if self.epsilon == 0.0 {
            return ix;
        }

        if rng.gen::<f64>() < self.epsilon {
            if best.len() == stats.n_arms() {
                return ix;
            }
            let explore = (0..stats.n_arms())
                .filter(|i| !best.contains(i))
                .collect::<Vec<_>>();
            return choose(&explore, rng);
        }

        ix
    }
}
