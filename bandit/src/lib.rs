//! Multi-armed bandit experiments in Rust.
//!
//! The workspace consists of the following crates:
//!
//! * [bandit-core](bandit_core) provides the [`Env`](bandit_core::Env) trait and the
//!   Gaussian [`TestBed`](bandit_core::TestBed), the [`Agent`](bandit_core::Agent) with
//!   epsilon-greedy, greedy and UCB policies, and the [`Simulation`](bandit_core::Simulation)
//!   harness aggregating learning curves over independent trials.
//! * [bandit](crate) is a collection of examples, and provides [`summarize`] to report
//!   a learning curve in the log.
//!
//! Rendering of the learning curves is left to external tools, the curves are
//! plain `Vec<f64>`.
use log::info;

/// Logs a learning curve, averaging it over `n_bins` consecutive windows.
///
/// Returns the window averages.
pub fn summarize(name: &str, curve: &[f64], n_bins: usize) -> Vec<f64> {
    if curve.is_empty() || n_bins == 0 {
        return vec![];
    }
    let bin_size = (curve.len() + n_bins - 1) / n_bins;
    let bins = curve
        .chunks(bin_size)
        .map(|c| c.iter().sum::<f64>() / c.len() as f64)
        .collect::<Vec<_>>();

    for (i, v) in bins.iter().enumerate() {
        let start = i * bin_size;
        let end = (start + bin_size).min(curve.len());
        info!("{} [{:>6}, {:>6}): {:.4}", name, start, end, v);
    }
    bins
}
