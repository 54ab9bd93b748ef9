#![warn(missing_docs)]
//! A library for multi-armed bandit experiments.
//!
//! * [`Env`] is a stationary K-armed bandit, [`TestBed`] is the Gaussian testbed.
//! * [`Agent`] learns the values of the arms with a [`Policy`], see [`policy`].
//! * [`Simulation`] runs many independent trials and aggregates their learning curves.
//!
//! ```rust
//! use bandit_core::{
//!     policy::{Ucb, UcbConfig},
//!     AgentConfig, Simulation, SimulationConfig, TestBed, TestBedConfig,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = SimulationConfig::default().n_trials(5).steps(100);
//! let mut sim = Simulation::<TestBed, Ucb>::build(
//!     config,
//!     TestBedConfig::default(),
//!     AgentConfig::default(),
//!     UcbConfig::default().c(2.0),
//! )?;
//! sim.run_all_trials()?;
//! let (steps, avg_rewards) = sim.aggregate_rewards()?;
//! assert_eq!(steps.len(), avg_rewards.len());
//! # Ok(())
//! # }
//! ```
pub mod dummy;
pub mod error;
pub mod policy;
pub mod record;

mod agent;
pub use agent::{Agent, AgentConfig, AgentStatus};

mod base;
pub use base::{ArmStats, Configurable, Env, Policy};

mod simulation;
pub use simulation::{average_histories, Simulation, SimulationConfig, AGENT_SEED_OFFSET};

mod testbed;
pub use testbed::{ArmSamples, TestBed, TestBedConfig};
