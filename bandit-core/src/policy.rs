//! Action-selection policies.
//!
//! * [`EpsilonGreedy`] explores arms with lower value estimates with probability `epsilon`.
//!   The greedy policy is [`EpsilonGreedy`] with `epsilon = 0`, see [`EpsilonGreedy::greedy()`].
//! * [`Ucb`] adds the exploration bonus `c * sqrt(ln(t) / n_i)` to the value estimates.
//!
//! All policies break ties uniformly at random among the maximizers.
mod epsilon_greedy;
mod ucb;
pub use epsilon_greedy::{EpsilonGreedy, EpsilonGreedyConfig};
pub use ucb::{Ucb, UcbConfig};

use rand::Rng;

/// Indices of the elements attaining the maximum of `vs`.
///
/// NaN is ignored. If no element attains a maximum, i.e., all elements are NaN,
/// every index is returned.
pub(crate) fn argmax_set(vs: &[f64]) -> Vec<usize> {
    let max = vs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let ixs: Vec<usize> = vs
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == max)
        .map(|(i, _)| i)
        .collect();
    if ixs.is_empty() {
        (0..vs.len()).collect()
    } else {
        ixs
    }
}

/// Uniformly chooses one of `ixs`, which must not be empty.
pub(crate) fn choose<R: Rng + ?Sized>(ixs: &[usize], rng: &mut R) -> usize {
    ixs[rng.gen_range(0..ixs.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_argmax_set() {
        assert_eq!(argmax_set(&[1.0, 3.0, 2.0, 3.0]), vec![1, 3]);
        assert_eq!(argmax_set(&[0.0, 0.0]), vec![0, 1]);
        assert_eq!(argmax_set(&[-1.5]), vec![0]);
        assert_eq!(argmax_set(&[f64::NAN, 1.0]), vec![1]);
        assert_eq!(argmax_set(&[f64::NAN, f64::NAN]), vec![0, 1]);
    }

    #[test]
    fn test_choose_is_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let ixs = [2, 5, 7];
        let mut counts = [0usize; 8];
        for _ in 0..3000 {
            counts[choose(&ixs, &mut rng)] += 1;
        }
        for &ix in ixs.iter() {
            assert!(counts[ix] > 850 && counts[ix] < 1150, "{:?}", counts);
        }
        assert_eq!(counts.iter().sum::<usize>(), 3000);
    }
}
