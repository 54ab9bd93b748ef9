//! Gaussian K-armed testbed.
use crate::{error::BanditError, Env};
use anyhow::Result;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TestBed`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TestBedConfig {
    /// The number of arms.
    pub n_arms: usize,
}

impl Default for TestBedConfig {
    fn default() -> Self {
        Self { n_arms: 10 }
    }
}

impl TestBedConfig {
    /// Sets the number of arms.
    pub fn n_arms(mut self, v: usize) -> Self {
        self.n_arms = v;
        self
    }

    /// Constructs [`TestBedConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TestBedConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Samples drawn from every arm of a [`TestBed`], for distribution plots.
#[derive(Debug, Clone, PartialEq)]
pub struct ArmSamples {
    /// Arm index of each sample.
    pub arm_index: Vec<usize>,

    /// Sampled rewards.
    pub value: Vec<f64>,
}

impl ArmSamples {
    /// Samples of the given arm.
    pub fn of_arm(&self, arm: usize) -> Vec<f64> {
        self.arm_index
            .iter()
            .zip(self.value.iter())
            .filter(|(&i, _)| i == arm)
            .map(|(_, &v)| v)
            .collect()
    }
}

/// The 10-armed testbed of Sutton & Barto, generalized to K arms.
///
/// The mean of each arm is drawn from `N(0, 1)` when the testbed is built,
/// and rewards of arm `i` follow `N(means[i], 1)`.
pub struct TestBed {
    n_arms: usize,
    means: Vec<f64>,
    stds: Vec<f64>,
    best_arm: usize,
    dists: Vec<Normal<f64>>,
    rng: StdRng,
    distributions: Option<ArmSamples>,
}

impl TestBed {
    /// Means of the arms.
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Standard deviations of the arms.
    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    /// Logs basic information about the testbed.
    pub fn describe(&self) {
        info!("Details about the testbed:");
        info!("Number of arms: {}", self.n_arms);
        info!("Means of the arms: {:?}", self.means);
        info!("Stds of the arms: {:?}", self.stds);
        info!("The best arm is {}", self.best_arm);
    }

    /// Draws `n_samples` rewards from every arm.
    ///
    /// The samples are drawn once and cached, later calls return the same set
    /// regardless of `n_samples`.
    pub fn sample_arms(&mut self, n_samples: usize) -> &ArmSamples {
        let Self {
            n_arms,
            dists,
            rng,
            distributions,
            ..
        } = self;

        distributions.get_or_insert_with(|| {
            let mut arm_index = Vec::with_capacity(*n_arms * n_samples);
            let mut value = Vec::with_capacity(*n_arms * n_samples);
            for (i, dist) in dists.iter().enumerate() {
                arm_index.extend(std::iter::repeat(i).take(n_samples));
                value.extend((0..n_samples).map(|_| dist.sample(rng)));
            }
            ArmSamples { arm_index, value }
        })
    }
}

impl Env for TestBed {
    type Config = TestBedConfig;

    fn build(config: &Self::Config, seed: u64) -> Result<Self, BanditError> {
        if config.n_arms < 1 {
            return Err(BanditError::InvalidConfiguration(format!(
                "n_arms must be at least 1, got {}",
                config.n_arms
            )));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let means: Vec<f64> = (0..config.n_arms)
            .map(|_| StandardNormal.sample(&mut rng))
            .collect();
        let stds = vec![1.0; config.n_arms];
        let dists = means
            .iter()
            .zip(stds.iter())
            .map(|(&m, &s)| {
                Normal::new(m, s).map_err(|e| BanditError::InvalidConfiguration(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let best_arm = argmax(&means);

        Ok(Self {
            n_arms: config.n_arms,
            means,
            stds,
            best_arm,
            dists,
            rng,
            distributions: None,
        })
    }

    fn n_arms(&self) -> usize {
        self.n_arms
    }

    fn emit(&mut self, arm: usize) -> Result<f64, BanditError> {
        if arm >= self.n_arms {
            return Err(BanditError::IndexOutOfRange {
                index: arm,
                n_arms: self.n_arms,
            });
        }
        Ok(self.dists[arm].sample(&mut self.rng))
    }

    fn best_arm(&self) -> usize {
        self.best_arm
    }
}

/// Index of the first maximum.
fn argmax(vs: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in vs.iter().enumerate() {
        if *v > vs[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_same_seed_same_arms() -> Result<()> {
        for n_arms in 1..8 {
            let config = TestBedConfig::default().n_arms(n_arms);
            let env1 = TestBed::build(&config, 42)?;
            let env2 = TestBed::build(&config, 42)?;
            assert_eq!(env1.means(), env2.means());
            assert_eq!(env1.means().len(), n_arms);
            assert!(env1.stds().iter().all(|&s| s == 1.0));
        }
        Ok(())
    }

    #[test]
    fn test_different_seed_different_arms() -> Result<()> {
        let config = TestBedConfig::default();
        let env1 = TestBed::build(&config, 42)?;
        let env2 = TestBed::build(&config, 43)?;
        assert_ne!(env1.means(), env2.means());
        Ok(())
    }

    #[test]
    fn test_best_arm() -> Result<()> {
        let env = TestBed::build(&TestBedConfig::default(), 7)?;
        let best = env.best_arm();
        assert!(env.means().iter().all(|&m| m <= env.means()[best]));
        Ok(())
    }

    #[test]
    fn test_zero_arms() {
        let config = TestBedConfig::default().n_arms(0);
        match TestBed::build(&config, 42) {
            Err(BanditError::InvalidConfiguration(_)) => {}
            _ => panic!("expected InvalidConfiguration"),
        }
    }

    #[test]
    fn test_emit_out_of_range() -> Result<()> {
        let mut env = TestBed::build(&TestBedConfig::default().n_arms(3), 42)?;
        assert_eq!(
            env.emit(3),
            Err(BanditError::IndexOutOfRange {
                index: 3,
                n_arms: 3
            })
        );
        assert!(env.emit(2).is_ok());
        Ok(())
    }

    #[test]
    fn test_emit_consumes_randomness() -> Result<()> {
        let mut env = TestBed::build(&TestBedConfig::default(), 42)?;
        let means = env.means().to_vec();
        let r1 = env.emit(0)?;
        let r2 = env.emit(0)?;
        assert_ne!(r1, r2);
        assert_eq!(env.means(), &means[..]);
        Ok(())
    }

    #[test]
    fn test_emit_mean() -> Result<()> {
        let mut env = TestBed::build(&TestBedConfig::default().n_arms(2), 3)?;
        let n = 20_000;
        let mean = (0..n).map(|_| env.emit(1)).sum::<Result<f64, _>>()? / n as f64;
        assert!((mean - env.means()[1]).abs() < 0.05);
        Ok(())
    }

    #[test]
    fn test_sample_arms() -> Result<()> {
        let mut env = TestBed::build(&TestBedConfig::default().n_arms(4), 42)?;
        let samples = env.sample_arms(100).clone();
        assert_eq!(samples.value.len(), 400);
        assert_eq!(samples.of_arm(2).len(), 100);

        // Cached after the first call
        assert_eq!(env.sample_arms(10), &samples);
        Ok(())
    }

    #[test]
    fn test_serde_testbed_config() -> Result<()> {
        let config = TestBedConfig::default().n_arms(5);
        let dir = TempDir::new("testbed_config")?;
        let path = dir.path().join("testbed_config.yaml");
        config.save(&path)?;
        let config_ = TestBedConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
