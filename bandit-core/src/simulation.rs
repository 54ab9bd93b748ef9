//! Run many independent trials and aggregate their learning curves.
mod config;
use crate::{
    error::BanditError,
    record::{NullRecorder, Record, RecordValue, Recorder},
    Agent, AgentConfig, Configurable, Env, Policy,
};
use anyhow::Result;
use chrono::Local;
pub use config::SimulationConfig;
use log::{debug, info};
use std::marker::PhantomData;

/// Offset between the seed of the environment and the seed of the agent of a trial.
///
/// Keeps the random stream of an agent apart from the one of its environment.
pub const AGENT_SEED_OFFSET: u64 = 1 << 32;

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Puts new agents in new environments, runs them, then repeats.
///
/// # Trials
///
/// For trial `i` in `0..n_trials`:
///
/// 1. Build an environment `E` with seed `seed + i`.
/// 2. Build a policy `P` from its configuration and an [`Agent`] on the environment,
///    with seed `seed + i + AGENT_SEED_OFFSET`.
/// 3. Initialize the values of the agent with `init_value`, then run it for `steps` steps.
/// 4. Append the reward and arm histories of the agent.
///
/// Trials run in ascending order, so the results are reproducible given the base seed.
/// If any trial fails, the histories of the simulation are left untouched.
///
/// ```mermaid
/// graph LR
///     S[Simulation]-->|seed + i|E[Env]
///     E-->A[Agent]
///     A-->|arm|E
///     E-->|reward|A
///     A-->|histories|S
///     S-->|average reward|R[Recorder]
/// ```
pub struct Simulation<E, P>
where
    E: Env,
    P: Policy + Configurable,
{
    config: SimulationConfig,
    env_config: E::Config,
    agent_config: AgentConfig,
    policy_config: P::Config,
    rewards_histories: Vec<Vec<f64>>,
    arms_histories: Vec<Vec<i64>>,
    best_arms: Vec<usize>,
    avg_rewards_history: Option<Vec<f64>>,
    phantom: PhantomData<P>,
}

impl<E, P> Simulation<E, P>
where
    E: Env,
    P: Policy + Configurable,
{
    /// Constructs a simulation.
    ///
    /// The policy configuration is validated here, so a malformed configuration
    /// fails before any trial runs.
    pub fn build(
        config: SimulationConfig,
        env_config: E::Config,
        agent_config: AgentConfig,
        policy_config: P::Config,
    ) -> Result<Self, BanditError> {
        if config.n_trials == 0 {
            return Err(BanditError::InvalidConfiguration(
                "the number of trials must be positive".to_string(),
            ));
        }
        if config.steps == 0 {
            return Err(BanditError::InvalidConfiguration(
                "the number of steps must be positive".to_string(),
            ));
        }
        let _ = P::build(policy_config.clone())?;

        Ok(Self {
            config,
            env_config,
            agent_config,
            policy_config,
            rewards_histories: vec![],
            arms_histories: vec![],
            best_arms: vec![],
            avg_rewards_history: None,
            phantom: PhantomData,
        })
    }

    /// Runs all trials, discarding records.
    pub fn run_all_trials(&mut self) -> Result<()> {
        self.run_all_trials_with_recorder(&mut NullRecorder::new())
    }

    /// Runs all trials.
    ///
    /// A record is written to `recorder` for every trial, with keys `trial`, `mean_reward`,
    /// `best_arm` and `best_arm_pulls`. After the last trial, a record holding the learning
    /// curves `average_reward` and `optimal_arm_ratio` is written.
    ///
    /// Histories of a previous call are replaced.
    pub fn run_all_trials_with_recorder<R: Recorder>(&mut self, recorder: &mut R) -> Result<()> {
        let n_trials = self.config.n_trials;
        let steps = self.config.steps;
        let started_at = Local::now();
        let mut rewards_histories = Vec::with_capacity(n_trials);
        let mut arms_histories = Vec::with_capacity(n_trials);
        let mut best_arms = Vec::with_capacity(n_trials);

        for i in 0..n_trials {
            let seed = self.config.seed.wrapping_add(i as u64);
            let env = E::build(&self.env_config, seed)?;
            let best_arm = env.best_arm();
            let policy = P::build(self.policy_config.clone())?;
            let mut agent = Agent::build(
                &self.agent_config,
                env,
                policy,
                seed.wrapping_add(AGENT_SEED_OFFSET),
            );
            agent.init_values(self.config.init_value)?;
            agent.run(steps)?;
            let (rewards, arms) = agent.into_histories();

            let mean_reward = rewards.iter().sum::<f64>() / steps as f64;
            let best_arm_pulls = arms.iter().filter(|&&a| a == best_arm as i64).count();
            recorder.write(Record::from_slice(&[
                ("trial", RecordValue::Scalar(i as f64)),
                ("mean_reward", RecordValue::Scalar(mean_reward)),
                ("best_arm", RecordValue::Scalar(best_arm as f64)),
                ("best_arm_pulls", RecordValue::Scalar(best_arm_pulls as f64)),
            ]));

            if self.config.verbose {
                info!("Trial {}/{} finished, mean reward = {:.4}", i + 1, n_trials, mean_reward);
            } else {
                debug!("Trial {}/{} finished, mean reward = {:.4}", i + 1, n_trials, mean_reward);
            }

            rewards_histories.push(rewards);
            arms_histories.push(arms);
            best_arms.push(best_arm);
        }

        self.rewards_histories = rewards_histories;
        self.arms_histories = arms_histories;
        self.best_arms = best_arms;
        self.avg_rewards_history = None;

        let (_, avg_rewards) = self.aggregate_rewards()?;
        let optimal_arm_ratio = self.aggregate_optimal_arm_ratio()?;
        recorder.write(Record::from_slice(&[
            ("average_reward", RecordValue::Array1(avg_rewards)),
            ("optimal_arm_ratio", RecordValue::Array1(optimal_arm_ratio)),
            ("started_at", RecordValue::DateTime(started_at)),
            ("finished_at", RecordValue::DateTime(Local::now())),
        ]));

        Ok(())
    }

    /// Returns the step indices and the reward at each step averaged over trials.
    ///
    /// Fails with [`BanditError::InconsistentHistoryLength`] if no trial has been run
    /// or if the trials have different numbers of steps.
    pub fn aggregate_rewards(&mut self) -> Result<(Vec<usize>, Vec<f64>), BanditError> {
        let avg = average_histories(&self.rewards_histories)?;
        let steps = (0..avg.len()).collect();
        self.avg_rewards_history = Some(avg.clone());
        Ok((steps, avg))
    }

    /// Returns the fraction of trials pulling the best arm of their environment at each step.
    pub fn aggregate_optimal_arm_ratio(&self) -> Result<Vec<f64>, BanditError> {
        let hits = self
            .arms_histories
            .iter()
            .zip(self.best_arms.iter())
            .map(|(arms, &best)| {
                arms.iter()
                    .map(|&a| if a == best as i64 { 1.0 } else { 0.0 })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        average_histories(&hits)
    }

    /// The configuration of the simulation.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Reward histories, one per trial in trial order.
    pub fn rewards_histories(&self) -> &[Vec<f64>] {
        &self.rewards_histories
    }

    /// Arm histories, one per trial in trial order.
    pub fn arms_histories(&self) -> &[Vec<i64>] {
        &self.arms_histories
    }

    /// Best arm of the environment of each trial.
    pub fn best_arms(&self) -> &[usize] {
        &self.best_arms
    }

    /// Average reward history computed by the last call of [`Simulation::aggregate_rewards`].
    pub fn avg_rewards_history(&self) -> Option<&[f64]> {
        self.avg_rewards_history.as_deref()
    }
}

/// Element-wise mean of histories of equal length.
pub fn average_histories(histories: &[Vec<f64>]) -> Result<Vec<f64>, BanditError> {
    let expected = match histories.first() {
        Some(h) if !h.is_empty() => h.len(),
        Some(_) | None => {
            return Err(BanditError::InconsistentHistoryLength {
                trial: 0,
                expected: 1,
                found: 0,
            })
        }
    };

    if let Some((trial, h)) = histories
        .iter()
        .enumerate()
        .find(|(_, h)| h.len() != expected)
    {
        return Err(BanditError::InconsistentHistoryLength {
            trial,
            expected,
            found: h.len(),
        });
    }

    let n = histories.len() as f64;
    let mut avg = vec![0.0; expected];
    for h in histories.iter() {
        for (a, v) in avg.iter_mut().zip(h.iter()) {
            *a += v;
        }
    }
    Ok(avg.into_iter().map(|v| v / n).collect())
}
