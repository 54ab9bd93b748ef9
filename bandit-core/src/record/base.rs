//! Base implementation of records.
use crate::error::BanditError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value.
    Scalar(f64),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array of floating-point values, e.g., a learning curve.
    Array1(Vec<f64>),
}

/// A container for storing key-value pairs of various data types.
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f64) -> Self {
        let mut map = HashMap::new();
        map.insert(name.into(), RecordValue::Scalar(value));
        Self(map)
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<'_, String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// If both records contain the same key, the value from the second record is kept.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f64, BanditError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(BanditError::RecordValueTypeError("Scalar".to_string())),
            None => Err(BanditError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f64>, BanditError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(BanditError::RecordValueTypeError("Array1".to_string())),
            None => Err(BanditError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_values() {
        let mut record = Record::from_scalar("mean_reward", 1.5);
        record.insert("best_arm", RecordValue::Scalar(2.0));
        record.insert("curve", RecordValue::Array1(vec![0.1, 0.2]));

        assert_eq!(record.get_scalar("mean_reward"), Ok(1.5));
        assert_eq!(record.get_scalar("best_arm"), Ok(2.0));
        assert_eq!(record.get_array1("curve"), Ok(vec![0.1, 0.2]));
        assert_eq!(
            record.get_scalar("curve"),
            Err(BanditError::RecordValueTypeError("Scalar".to_string()))
        );
        assert_eq!(
            record.get_array1("missing"),
            Err(BanditError::RecordKeyError("missing".to_string()))
        );
    }

    #[test]
    fn test_merge() {
        let r1 = Record::from_slice(&[
            ("a", RecordValue::Scalar(1.0)),
            ("b", RecordValue::Scalar(2.0)),
        ]);
        let r2 = Record::from_scalar("b", 3.0);
        let merged = r1.merge(r2);
        assert_eq!(merged.get_scalar("a"), Ok(1.0));
        assert_eq!(merged.get_scalar("b"), Ok(3.0));
        assert!(!merged.is_empty());
        assert!(Record::empty().is_empty());
    }
}
