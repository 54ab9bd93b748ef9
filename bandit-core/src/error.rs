//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    /// A constructor received a parameter outside of its domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An arm index outside of `[0, n_arms)`.
    #[error("Arm index {index} is out of range for {n_arms} arms")]
    IndexOutOfRange {
        /// Requested arm.
        index: usize,

        /// Number of arms of the environment.
        n_arms: usize,
    },

    /// The agent was run before its values were initialized.
    #[error("Agent is not initialized, call init_values() before run()")]
    NotInitialized,

    /// Histories of trials to be aggregated have different lengths.
    #[error("Inconsistent history length: trial {trial} has {found} steps, expected {expected}")]
    InconsistentHistoryLength {
        /// Index of the offending trial.
        trial: usize,

        /// Expected number of steps.
        expected: usize,

        /// Number of steps in the trial.
        found: usize,
    },

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
