//! Types and traits for recording results of simulations.
//!
//! # Core Components
//!
//! * [`Record`] - A flexible container for storing key-value pairs of various data types
//! * [`RecordValue`] - An enum representing different types of values that can be stored
//! * [`Recorder`] - A trait defining the interface for recording data
//! * [`RecordStorage`] - A storage system with aggregation capabilities
//! * [`BufferedRecorder`] - A recorder that keeps records in memory
//! * [`NullRecorder`] - A recorder that discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use bandit_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("trial", RecordValue::Scalar(0.0));
//! record.insert("mean_reward", RecordValue::Scalar(1.2));
//! record.insert("rewards", RecordValue::Array1(vec![0.3, 1.5, 1.8]));
//! assert_eq!(record.get_scalar("mean_reward").unwrap(), 1.2);
//! ```
//!
//! [`Simulation`](crate::Simulation) writes one record per trial and the
//! learning curve to a [`Recorder`]. Records are kept in memory, rendering
//! and persistence are left to the consumer.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
pub use storage::RecordStorage;
