//! Upper confidence bound policy.
use super::{argmax_set, choose};
use crate::{error::BanditError, ArmStats, Configurable, Policy};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Configuration of [`Ucb`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct UcbConfig {
    /// Degree of exploration, must be positive.
    pub c: f64,
}

impl Default for UcbConfig {
    fn default() -> Self {
        Self { c: 2.0 }
    }
}

impl UcbConfig {
    /// Sets the degree of exploration.
    pub fn c(mut self, v: f64) -> Self {
        self.c = v;
        self
    }
}

/// Upper confidence bound (UCB) policy.
///
/// Every arm is pulled once, in random order, before the bounds are used.
/// After that, the arm maximizing
///
/// ```text
/// values[i] + c * sqrt(ln(t) / counts[i])
/// ```
///
/// is pulled, where `t = step + 1` is the 1-indexed step.
#[derive(Debug, Clone)]
pub struct Ucb {
    c: f64,

    /// Upper confidence bounds computed at the last step, empty during initial exploration.
    ucbs: Vec<f64>,
}

impl Ucb {
    /// Degree of exploration.
    pub fn c(&self) -> f64 {
        self.c
    }

    /// Upper confidence bounds computed at the last call of [`Policy::pick_arm`].
    pub fn ucbs(&self) -> &[f64] {
        &self.ucbs
    }
}

impl Configurable for Ucb {
    type Config = UcbConfig;

    fn build(config: Self::Config) -> Result<Self, BanditError> {
        if !(config.c > 0.0 && config.c.is_finite()) {
            return Err(BanditError::InvalidConfiguration(format!(
                "c must be positive, got {}",
                config.c
            )));
        }
        Ok(Self {
            c: config.c,
            ucbs: vec![],
        })
    }
}

impl Policy for Ucb {
    fn pick_arm<R: Rng + ?Sized>(&mut self, stats: &ArmStats, rng: &mut R) -> usize {
        let unexplored = stats
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &n)| n == 0)
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        if !unexplored.is_empty() {
            self.ucbs.clear();
            return choose(&unexplored, rng);
        }

        let ln_t = ((stats.step + 1) as f64).ln();
        self.ucbs = stats
            .values
            .iter()
            .zip(stats.counts.iter())
            .map(|(&v, &n)| v + self.c * (ln_t / n as f64).sqrt())
            .collect();

        choose(&argmax_set(&self.ucbs), rng)
    }
}
