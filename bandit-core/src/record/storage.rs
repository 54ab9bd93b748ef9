//! Record storage and aggregation.
//!
//! Scalar values are summarized with min, max, mean and median, while for the
//! other types the most recent value is kept.
use super::{Record, RecordValue};
use log::warn;
use std::collections::HashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// A storage system for records with aggregation capabilities.
#[derive(Default)]
pub struct RecordStorage {
    data: Vec<Record>,
}

fn min(vs: &[f64]) -> RecordValue {
    RecordValue::Scalar(vs.iter().cloned().fold(f64::INFINITY, f64::min))
}

fn max(vs: &[f64]) -> RecordValue {
    RecordValue::Scalar(vs.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
}

fn mean(vs: &[f64]) -> RecordValue {
    RecordValue::Scalar(vs.iter().sum::<f64>() / vs.len() as f64)
}

/// Upper median, i.e., `vs[n / 2]` after sorting.
fn median(mut vs: Vec<f64>) -> RecordValue {
    vs.sort_by(|x, y| x.total_cmp(y));
    RecordValue::Scalar(vs[vs.len() / 2])
}

impl RecordStorage {
    /// Creates a new empty record storage.
    pub fn new() -> Self {
        Self { data: vec![] }
    }

    /// Stores a record in the storage.
    pub fn store(&mut self, record: Record) {
        self.data.push(record);
    }

    fn get_keys(&self) -> HashSet<String, Xxh3Builder> {
        let mut keys = HashSet::<String, Xxh3Builder>::default();
        for record in self.data.iter() {
            for k in record.keys() {
                keys.insert(k.clone());
            }
        }
        keys
    }

    /// The most recent value of the given key.
    fn latest(&self, key: &str) -> Option<&RecordValue> {
        self.data.iter().rev().find_map(|record| record.get(key))
    }

    fn scalar(&self, key: &str) -> Record {
        let vs: Vec<f64> = self
            .data
            .iter()
            .filter_map(|record| match record.get(key) {
                Some(RecordValue::Scalar(v)) => Some(*v),
                Some(_) => {
                    warn!("Skip non-scalar value of {} in aggregation", key);
                    None
                }
                None => None,
            })
            .collect();

        if vs.len() == 1 {
            Record::from_slice(&[(key, RecordValue::Scalar(vs[0]))])
        } else {
            Record::from_slice(&[
                (format!("{}_min", key), min(&vs)),
                (format!("{}_max", key), max(&vs)),
                (format!("{}_mean", key), mean(&vs)),
                (format!("{}_median", key), median(vs)),
            ])
        }
    }

    /// Aggregates all stored records and clears the storage.
    pub fn aggregate(&mut self) -> Record {
        let mut record = Record::empty();

        for key in self.get_keys().iter() {
            let r = match self.latest(key) {
                Some(RecordValue::Scalar(..)) => self.scalar(key),
                Some(value) => Record::from_slice(&[(key.as_str(), value.clone())]),
                None => continue,
            };
            record = record.merge(r);
        }

        self.data = vec![];

        record
    }
}
