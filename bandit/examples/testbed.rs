use anyhow::Result;
use bandit::summarize;
use bandit_core::{
    policy::{EpsilonGreedy, EpsilonGreedyConfig, Ucb, UcbConfig},
    record::BufferedRecorder,
    AgentConfig, Configurable, Env, Policy, Simulation, SimulationConfig, TestBed, TestBedConfig,
};
use clap::{Parser, ValueEnum};
use log::info;

const N_BINS: usize = 10;
const N_SAMPLES_PER_ARM: usize = 1000;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
enum PolicyKind {
    Greedy,
    EpsilonGreedy,
    Ucb,
}

/// Run bandit agents on the Gaussian testbed
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Action-selection policy
    #[arg(short, long, value_enum, default_value_t = PolicyKind::EpsilonGreedy)]
    policy: PolicyKind,

    /// Probability of exploration of the epsilon-greedy policy
    #[arg(long, default_value_t = 0.1)]
    epsilon: f64,

    /// Degree of exploration of the UCB policy
    #[arg(short, long, default_value_t = 2.0)]
    c: f64,

    /// Number of arms
    #[arg(long, default_value_t = 10)]
    n_arms: usize,

    /// Simulation configuration in YAML, overrides the options below
    #[arg(long)]
    config: Option<String>,

    /// Number of trials
    #[arg(long, default_value_t = 100)]
    n_trials: usize,

    /// Number of steps of each trial
    #[arg(long, default_value_t = 1000)]
    steps: usize,

    /// Initial value estimate, drawn from N(0, 1) if not given
    #[arg(long)]
    init_value: Option<f64>,

    /// Base random seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log progress of each trial
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Describe the testbed of the first trial before running
    #[arg(short, long, default_value_t = false)]
    describe: bool,
}

fn simulation_config(args: &Args) -> Result<SimulationConfig> {
    match &args.config {
        Some(path) => SimulationConfig::load(path),
        None => Ok(SimulationConfig::default()
            .n_trials(args.n_trials)
            .steps(args.steps)
            .init_value(args.init_value)
            .seed(args.seed)
            .verbose(args.verbose)),
    }
}

fn describe(env_config: &TestBedConfig, seed: u64) -> Result<()> {
    let mut env = TestBed::build(env_config, seed)?;
    env.describe();
    let samples = env.sample_arms(N_SAMPLES_PER_ARM);
    for arm in 0..env_config.n_arms {
        let vs = samples.of_arm(arm);
        let mean = vs.iter().sum::<f64>() / vs.len() as f64;
        info!("Arm {}: sample mean = {:.4} over {} samples", arm, mean, vs.len());
    }
    Ok(())
}

fn run<P: Policy + Configurable>(args: &Args, policy_config: P::Config) -> Result<Vec<f64>> {
    let config = simulation_config(args)?;
    let env_config = TestBedConfig::default().n_arms(args.n_arms);
    let agent_config = AgentConfig::default().verbose(false);

    if args.describe {
        describe(&env_config, config.seed)?;
    }

    let n_trials = config.n_trials;
    let mut sim = Simulation::<TestBed, P>::build(config, env_config, agent_config, policy_config)?;
    let mut recorder = BufferedRecorder::new();
    sim.run_all_trials_with_recorder(&mut recorder)?;

    let summary = recorder.aggregate("mean_reward");
    info!(
        "Mean reward over {} trials: {:.4} (min {:.4}, max {:.4})",
        n_trials,
        summary.get_scalar("mean_reward_mean").or_else(|_| summary.get_scalar("mean_reward"))?,
        summary.get_scalar("mean_reward_min").or_else(|_| summary.get_scalar("mean_reward"))?,
        summary.get_scalar("mean_reward_max").or_else(|_| summary.get_scalar("mean_reward"))?,
    );

    let (_, avg_rewards) = sim.aggregate_rewards()?;
    summarize("Average reward", &avg_rewards, N_BINS);
    summarize("Optimal arm", &sim.aggregate_optimal_arm_ratio()?, N_BINS);

    Ok(avg_rewards)
}

fn run_with_args(args: &Args) -> Result<Vec<f64>> {
    info!("Policy: {:?}", args.policy);
    match args.policy {
        PolicyKind::Greedy => run::<EpsilonGreedy>(args, EpsilonGreedyConfig::greedy()),
        PolicyKind::EpsilonGreedy => run::<EpsilonGreedy>(
            args,
            EpsilonGreedyConfig::default().epsilon(args.epsilon),
        ),
        PolicyKind::Ucb => run::<Ucb>(args, UcbConfig::default().c(args.c)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    run_with_args(&args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run_with_args, Args, PolicyKind};
    use anyhow::Result;
    use bandit_core::SimulationConfig;
    use tempdir::TempDir;

    fn args(policy: PolicyKind) -> Args {
        Args {
            policy,
            epsilon: 0.1,
            c: 2.0,
            n_arms: 5,
            config: None,
            n_trials: 4,
            steps: 50,
            init_value: None,
            seed: 42,
            verbose: false,
            describe: true,
        }
    }

    #[test]
    fn test_testbed() -> Result<()> {
        for &policy in [PolicyKind::Greedy, PolicyKind::EpsilonGreedy, PolicyKind::Ucb].iter() {
            let avg = run_with_args(&args(policy))?;
            assert_eq!(avg.len(), 50);
        }
        Ok(())
    }

    #[test]
    fn test_testbed_with_config_file() -> Result<()> {
        let tmp_dir = TempDir::new("testbed")?;
        let path = tmp_dir.path().join("simulation.yaml");
        SimulationConfig::default().n_trials(2).steps(30).save(&path)?;

        let mut args = args(PolicyKind::Ucb);
        args.config = path.to_str().map(|s| s.to_string());
        let avg = run_with_args(&args)?;
        assert_eq!(avg.len(), 30);
        Ok(())
    }

    #[test]
    fn test_invalid_epsilon() {
        let mut args = args(PolicyKind::EpsilonGreedy);
        args.epsilon = 1.5;
        assert!(run_with_args(&args).is_err());
    }
}
