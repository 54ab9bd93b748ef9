use super::{Record, RecordStorage, Recorder};

/// Buffered recorder.
///
/// Keeps records in memory, for example the per-trial records of a
/// [`Simulation`](crate::Simulation).
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self { buf: Vec::default() }
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.buf.iter()
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Aggregates the records having the given key, see [`RecordStorage::aggregate`].
    pub fn aggregate(&self, key: &str) -> Record {
        let mut storage = RecordStorage::new();
        for record in self.buf.iter().filter(|r| r.get(key).is_some()) {
            storage.store(record.clone());
        }
        storage.aggregate()
    }
}

impl Recorder for BufferedRecorder {
    /// Write a [`Record`] to the buffer.
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }
}
