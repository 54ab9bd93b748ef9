//! Agent.
use crate::{error::BanditError, ArmStats, Env, Policy};
use anyhow::Result;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Agent`].
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct AgentConfig {
    /// If `true`, progress of [`Agent::run`] is logged at info level.
    pub verbose: bool,
}

impl AgentConfig {
    /// Sets the verbosity.
    pub fn verbose(mut self, v: bool) -> Self {
        self.verbose = v;
        self
    }

    /// Constructs [`AgentConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`AgentConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// Lifecycle of an [`Agent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentStatus {
    /// Built, [`Agent::init_values`] not called yet.
    Uninitialized,

    /// Values initialized, ready to run.
    Initialized,

    /// Inside [`Agent::run`].
    Running,

    /// The run completed, histories are final.
    Finished,
}

/// An agent learning the values of the arms of an environment.
///
/// The agent owns the environment it is bound to and a random number generator,
/// used for random initialization of the values and by the policy.
///
/// At every step of [`Agent::run`], the agent
///
/// 1. picks an arm with [`Policy::pick_arm`],
/// 2. pulls it with [`Env::emit`],
/// 3. increments the pull counter of the arm,
/// 4. updates the value estimate with [`Policy::update_values`],
/// 5. records the reward and the arm.
pub struct Agent<E, P, R = StdRng>
where
    E: Env,
    P: Policy,
    R: Rng,
{
    env: E,
    policy: P,
    rng: R,
    verbose: bool,
    stats: ArmStats,
    current_arm: Option<usize>,
    current_reward: Option<f64>,
    rewards_history: Vec<f64>,
    arms_history: Vec<i64>,
    status: AgentStatus,
}

impl<E, P> Agent<E, P, StdRng>
where
    E: Env,
    P: Policy,
{
    /// Builds an agent on `env`, with a random number generator seeded by `seed`.
    pub fn build(config: &AgentConfig, env: E, policy: P, seed: u64) -> Self {
        Self::with_rng(config, env, policy, StdRng::seed_from_u64(seed))
    }
}

impl<E, P, R> Agent<E, P, R>
where
    E: Env,
    P: Policy,
    R: Rng,
{
    /// Builds an agent on `env` with the given random number generator.
    pub fn with_rng(config: &AgentConfig, env: E, policy: P, rng: R) -> Self {
        let n_arms = env.n_arms();
        Self {
            env,
            policy,
            rng,
            verbose: config.verbose,
            stats: ArmStats::new(vec![0.0; n_arms]),
            current_arm: None,
            current_reward: None,
            rewards_history: vec![],
            arms_history: vec![],
            status: AgentStatus::Uninitialized,
        }
    }

    /// Initializes the value estimates and resets the counters.
    ///
    /// With `Some(v)`, every estimate is set to `v`, which gives optimistic
    /// or pessimistic initialization. With `None`, each estimate is drawn from `N(0, 1)`.
    pub fn init_values(&mut self, value: Option<f64>) -> Result<(), BanditError> {
        let n_arms = self.env.n_arms();
        let values = match value {
            Some(v) if !v.is_finite() => {
                return Err(BanditError::InvalidConfiguration(format!(
                    "initial value must be finite, got {}",
                    v
                )));
            }
            Some(v) => vec![v; n_arms],
            None => (0..n_arms)
                .map(|_| self.rng.sample(StandardNormal))
                .collect(),
        };

        self.stats = ArmStats::new(values);
        self.current_arm = None;
        self.current_reward = None;
        self.status = AgentStatus::Initialized;
        Ok(())
    }

    /// Runs the agent for `steps` steps.
    ///
    /// Does nothing if the agent has already finished a run.
    pub fn run(&mut self, steps: usize) -> Result<(), BanditError> {
        match self.status {
            AgentStatus::Finished => {
                debug!("Agent has already finished, skip run()");
                return Ok(());
            }
            AgentStatus::Uninitialized | AgentStatus::Running => {
                return Err(BanditError::NotInitialized);
            }
            AgentStatus::Initialized => {}
        }
        if steps == 0 {
            return Err(BanditError::InvalidConfiguration(
                "the number of steps must be positive".to_string(),
            ));
        }

        self.status = AgentStatus::Running;
        self.rewards_history = vec![0.0; steps];
        self.arms_history = vec![-1; steps];
        let log_interval = (steps / 10).max(1);

        for _ in 0..steps {
            let (arm, reward) = self.take_single_step()?;
            self.stats.counts[arm] += 1;
            self.policy.update_values(&mut self.stats, arm, reward);
            self.update_logs();
            self.stats.step += 1;
            debug_assert_eq!(self.stats.total_counts(), self.stats.step);

            if self.stats.step % log_interval == 0 {
                if self.verbose {
                    info!("Agent running: {}/{} steps", self.stats.step, steps);
                } else {
                    debug!("Agent running: {}/{} steps", self.stats.step, steps);
                }
            }
        }

        self.status = AgentStatus::Finished;
        Ok(())
    }

    /// Picks an arm and pulls it, without updating the counters and values.
    fn take_single_step(&mut self) -> Result<(usize, f64), BanditError> {
        let arm = self.policy.pick_arm(&self.stats, &mut self.rng);
        let reward = self.env.emit(arm)?;
        self.current_arm = Some(arm);
        self.current_reward = Some(reward);
        Ok((arm, reward))
    }

    fn update_logs(&mut self) {
        let step = self.stats.step;
        if let (Some(arm), Some(reward)) = (self.current_arm, self.current_reward) {
            self.rewards_history[step] = reward;
            self.arms_history[step] = arm as i64;
        }
    }

    /// Logs the end state of the agent.
    pub fn describe(&self) {
        if self.status != AgentStatus::Finished {
            info!("Agent has not run yet.");
        } else {
            info!("reward history: {:?}", self.rewards_history);
            info!("arm history: {:?}", self.arms_history);
            info!("arm counts: {:?}", self.stats.counts);
            info!("arm values: {:?}", self.stats.values);
        }
    }

    /// The environment the agent is bound to.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The policy of the agent.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Current status.
    pub fn status(&self) -> AgentStatus {
        self.status
    }

    /// Returns `true` if a run has been completed.
    pub fn is_finished(&self) -> bool {
        self.status == AgentStatus::Finished
    }

    /// Arm statistics, i.e., value estimates, pull counts and the current step.
    pub fn stats(&self) -> &ArmStats {
        &self.stats
    }

    /// Value estimates of the arms.
    pub fn arm_values(&self) -> &[f64] {
        &self.stats.values
    }

    /// Pull counts of the arms.
    pub fn arm_counts(&self) -> &[usize] {
        &self.stats.counts
    }

    /// The current step, 0-indexed.
    pub fn current_step(&self) -> usize {
        self.stats.step
    }

    /// Reward obtained at each step.
    pub fn rewards_history(&self) -> &[f64] {
        &self.rewards_history
    }

    /// Arm pulled at each step, `-1` for steps not taken.
    pub fn arms_history(&self) -> &[i64] {
        &self.arms_history
    }

    /// Consumes the agent, returning the reward and arm histories.
    pub fn into_histories(self) -> (Vec<f64>, Vec<i64>) {
        (self.rewards_history, self.arms_history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dummy::FixedRewards,
        policy::{EpsilonGreedy, EpsilonGreedyConfig, Ucb, UcbConfig},
        Configurable, TestBed, TestBedConfig,
    };
    use rand::rngs::mock::StepRng;
    use tempdir::TempDir;

    fn testbed(n_arms: usize, seed: u64) -> TestBed {
        TestBed::build(&TestBedConfig::default().n_arms(n_arms), seed).unwrap()
    }

    fn greedy_agent(n_arms: usize) -> Agent<TestBed, EpsilonGreedy> {
        Agent::build(&AgentConfig::default(), testbed(n_arms, 0), EpsilonGreedy::greedy(), 0)
    }

    #[test]
    fn test_run_before_init() {
        let mut agent = greedy_agent(3);
        assert_eq!(agent.status(), AgentStatus::Uninitialized);
        assert_eq!(agent.run(10), Err(BanditError::NotInitialized));
    }

    #[test]
    fn test_run_zero_steps() {
        let mut agent = greedy_agent(3);
        agent.init_values(Some(0.0)).unwrap();
        assert!(matches!(
            agent.run(0),
            Err(BanditError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_init_values() {
        let mut agent = greedy_agent(4);
        agent.init_values(Some(5.0)).unwrap();
        assert_eq!(agent.arm_values(), &[5.0; 4]);
        assert_eq!(agent.arm_counts(), &[0; 4]);
        assert_eq!(agent.status(), AgentStatus::Initialized);

        agent.init_values(None).unwrap();
        let values = agent.arm_values().to_vec();
        assert_eq!(values.len(), 4);
        assert!(values.iter().any(|&v| v != values[0]));

        assert!(agent.init_values(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_counts_and_histories() -> Result<()> {
        let policy = EpsilonGreedy::build(EpsilonGreedyConfig::default().epsilon(0.1))?;
        let mut agent = Agent::build(&AgentConfig::default(), testbed(10, 1), policy, 1);
        agent.init_values(None)?;
        agent.run(500)?;

        assert!(agent.is_finished());
        agent.describe();
        assert_eq!(agent.current_step(), 500);
        assert_eq!(agent.arm_counts().iter().sum::<usize>(), 500);
        assert_eq!(agent.rewards_history().len(), 500);
        assert_eq!(agent.arms_history().len(), 500);
        assert!(agent.arms_history().iter().all(|&a| (0..10).contains(&a)));

        for arm in 0..10 {
            let n = agent.arms_history().iter().filter(|&&a| a == arm as i64).count();
            assert_eq!(n, agent.arm_counts()[arm]);
        }
        Ok(())
    }

    #[test]
    fn test_finished_agent_does_not_run_again() -> Result<()> {
        let policy = Ucb::build(UcbConfig::default())?;
        let mut agent = Agent::build(&AgentConfig::default(), testbed(3, 0), policy, 0);
        agent.init_values(Some(0.0))?;
        agent.run(20)?;
        let rewards = agent.rewards_history().to_vec();
        agent.run(50)?;
        assert_eq!(agent.rewards_history(), &rewards[..]);
        assert_eq!(agent.current_step(), 20);

        // Runs again after re-initialization
        agent.init_values(Some(0.0))?;
        agent.run(50)?;
        assert_eq!(agent.current_step(), 50);
        assert_eq!(agent.rewards_history().len(), 50);
        Ok(())
    }

    #[test]
    fn test_values_are_sample_means() -> Result<()> {
        let policy = EpsilonGreedy::build(EpsilonGreedyConfig::default().epsilon(0.5))?;
        let mut agent = Agent::build(&AgentConfig::default(), testbed(4, 3), policy, 3);
        agent.init_values(Some(100.0))?;
        agent.run(300)?;

        for arm in 0..4 {
            let rewards = agent
                .arms_history()
                .iter()
                .zip(agent.rewards_history().iter())
                .filter(|(&a, _)| a == arm as i64)
                .map(|(_, &r)| r)
                .collect::<Vec<_>>();
            if rewards.is_empty() {
                assert_eq!(agent.arm_values()[arm], 100.0);
            } else {
                let mean = rewards.iter().sum::<f64>() / rewards.len() as f64;
                assert!((agent.arm_values()[arm] - mean).abs() < 1e-9);
            }
        }
        Ok(())
    }

    #[test]
    fn test_greedy_end_to_end() -> Result<()> {
        // All-zero generator breaks every tie towards the first arm
        let env = FixedRewards::new(vec![5.0, 1.0]);
        let rng = StepRng::new(0, 0);
        let mut agent = Agent::with_rng(&AgentConfig::default(), env, EpsilonGreedy::greedy(), rng);
        agent.init_values(Some(0.0))?;
        agent.run(2)?;

        assert_eq!(agent.arms_history(), &[0, 0]);
        assert_eq!(agent.arm_counts(), &[2, 0]);
        assert_eq!(agent.arm_values(), &[5.0, 0.0]);
        assert_eq!(agent.rewards_history(), &[5.0, 5.0]);
        Ok(())
    }

    #[test]
    fn test_emit_error_aborts_run() {
        struct OutOfRange;

        impl Policy for OutOfRange {
            fn pick_arm<R: Rng + ?Sized>(&mut self, stats: &ArmStats, _rng: &mut R) -> usize {
                stats.n_arms()
            }
        }

        let mut agent = Agent::build(&AgentConfig::default(), testbed(2, 0), OutOfRange, 0);
        agent.init_values(Some(0.0)).unwrap();
        assert_eq!(
            agent.run(5),
            Err(BanditError::IndexOutOfRange {
                index: 2,
                n_arms: 2
            })
        );
        assert!(!agent.is_finished());
        assert_eq!(agent.arm_counts(), &[0, 0]);
    }

    #[test]
    fn test_serde_agent_config() -> Result<()> {
        let config = AgentConfig::default().verbose(true);
        let dir = TempDir::new("agent_config")?;
        let path = dir.path().join("agent_config.yaml");
        config.save(&path)?;
        assert_eq!(AgentConfig::load(&path)?, config);
        Ok(())
    }
}
