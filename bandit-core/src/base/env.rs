//! Environment.
use crate::error::BanditError;

/// Represents a stationary K-armed bandit.
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Builds an environment with a given random seed.
    ///
    /// Building twice with the same configuration and seed must give the same arms.
    fn build(config: &Self::Config, seed: u64) -> Result<Self, BanditError>
    where
        Self: Sized;

    /// The number of arms.
    fn n_arms(&self) -> usize;

    /// Samples a reward from the given arm.
    ///
    /// Returns [`BanditError::IndexOutOfRange`] unless `arm < n_arms()`.
    /// Each call consumes randomness of the environment, so repeated calls
    /// give different rewards.
    fn emit(&mut self, arm: usize) -> Result<f64, BanditError>;

    /// The arm with the largest expected reward.
    ///
    /// Used only for diagnostics, agents never see it.
    fn best_arm(&self) -> usize;
}
