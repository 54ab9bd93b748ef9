//! Policy.
use super::ArmStats;
use crate::error::BanditError;
use anyhow::Result;
use rand::Rng;
use serde::de::DeserializeOwned;
use std::path::Path;

/// An action-selection rule on a bandit.
///
/// A policy maps the arm statistics of an agent to the arm to be pulled next.
/// The incremental sample-average update is shared by all policies and
/// provided as a default method.
pub trait Policy {
    /// Picks the arm to be pulled at the current step.
    ///
    /// `stats.n_arms()` is at least 1. Any randomness, including tie-breaking,
    /// is drawn from `rng`.
    fn pick_arm<R: Rng + ?Sized>(&mut self, stats: &ArmStats, rng: &mut R) -> usize;

    /// Updates the value estimate of `arm` with the observed `reward`.
    ///
    /// `stats.counts[arm]` must already include the current pull.
    fn update_values(&mut self, stats: &mut ArmStats, arm: usize, reward: f64) {
        let n = stats.counts[arm] as f64;
        stats.values[arm] += (reward - stats.values[arm]) / n;
    }
}

/// A configurable object, having type parameter.
pub trait Configurable {
    /// Configuration.
    type Config: Clone + DeserializeOwned;

    /// Builds the object.
    ///
    /// Fails with [`BanditError::InvalidConfiguration`] for malformed parameters.
    fn build(config: Self::Config) -> Result<Self, BanditError>
    where
        Self: Sized;

    /// Build the object with the configuration in the yaml file of the given path.
    fn build_from_path(path: impl AsRef<Path>) -> Result<Self>
    where
        Self: Sized,
    {
        let file = std::fs::File::open(path)?;
        let rdr = std::io::BufReader::new(file);
        let config = serde_yaml::from_reader(rdr)?;
        Ok(Self::build(config)?)
    }
}
