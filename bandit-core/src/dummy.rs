//! This module is used for tests.
use crate::{error::BanditError, Env};

/// A bandit whose arms always return the same reward.
#[derive(Clone, Debug)]
pub struct FixedRewards {
    rewards: Vec<f64>,
}

impl FixedRewards {
    /// Constructs a bandit where arm `i` always returns `rewards[i]`.
    pub fn new(rewards: Vec<f64>) -> Self {
        Self { rewards }
    }
}

impl Env for FixedRewards {
    type Config = Vec<f64>;

    fn build(config: &Self::Config, _seed: u64) -> Result<Self, BanditError> {
        if config.is_empty() {
            return Err(BanditError::InvalidConfiguration(
                "at least one arm is required".to_string(),
            ));
        }
        Ok(Self::new(config.clone()))
    }

    fn n_arms(&self) -> usize {
        self.rewards.len()
    }

    fn emit(&mut self, arm: usize) -> Result<f64, BanditError> {
        self.rewards
            .get(arm)
            .copied()
            .ok_or(BanditError::IndexOutOfRange {
                index: arm,
                n_arms: self.rewards.len(),
            })
    }

    fn best_arm(&self) -> usize {
        let mut best = 0;
        for (i, r) in self.rewards.iter().enumerate() {
            if *r > self.rewards[best] {
                best = i;
            }
        }
        best
    }
}
