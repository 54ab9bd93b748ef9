//! Core functionalities.
mod env;
mod policy;
pub use env::Env;
pub use policy::{Configurable, Policy};

/// Statistics of the arms maintained by an agent.
///
/// This is what a [`Policy`] sees when it picks an arm: the current value
/// estimates, the pull counters and the 0-indexed step counter.
/// The statistics of the environment itself are never exposed.
#[derive(Clone, Debug, PartialEq)]
pub struct ArmStats {
    /// Value estimate of each arm.
    pub values: Vec<f64>,

    /// Number of pulls of each arm.
    pub counts: Vec<usize>,

    /// The current step, 0-indexed.
    pub step: usize,
}

impl ArmStats {
    /// Creates statistics for `n_arms` arms with the given initial values.
    pub fn new(values: Vec<f64>) -> Self {
        let n_arms = values.len();
        Self {
            values,
            counts: vec![0; n_arms],
            step: 0,
        }
    }

    /// The number of arms.
    pub fn n_arms(&self) -> usize {
        self.values.len()
    }

    /// Total number of pulls over all arms.
    pub fn total_counts(&self) -> usize {
        self.counts.iter().sum()
    }
}
