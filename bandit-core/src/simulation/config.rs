//! Configuration of [`Simulation`](super::Simulation).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Simulation`](super::Simulation).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SimulationConfig {
    /// The number of trials, i.e., independent environment and agent pairs.
    pub n_trials: usize,

    /// Initial value estimate of the agents.
    ///
    /// If `None`, initial values are drawn from `N(0, 1)`.
    pub init_value: Option<f64>,

    /// The number of steps of each trial.
    pub steps: usize,

    /// Base random seed. The environment of trial `i` is built with `seed + i`.
    pub seed: u64,

    /// If `true`, progress of trials is logged at info level.
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_trials: 10,
            init_value: None,
            steps: 1000,
            seed: 42,
            verbose: false,
        }
    }
}

impl SimulationConfig {
    /// Sets the number of trials.
    pub fn n_trials(mut self, v: usize) -> Self {
        self.n_trials = v;
        self
    }

    /// Sets the initial value estimate.
    pub fn init_value(mut self, v: Option<f64>) -> Self {
        self.init_value = v;
        self
    }

    /// Sets the number of steps of each trial.
    pub fn steps(mut self, v: usize) -> Self {
        self.steps = v;
        self
    }

    /// Sets the base random seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Sets the verbosity.
    pub fn verbose(mut self, v: bool) -> Self {
        self.verbose = v;
        self
    }

    /// Constructs [`SimulationConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`SimulationConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
