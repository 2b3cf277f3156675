//! In-memory handler
//!
//! A bounded queue of published records, usable as a diagnostic ring buffer
//! or as an assertion sink in tests. When full, the oldest record is dropped
//! to make room.

use crate::backend::{Handler, LogRecord};
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 1024;

pub struct MemoryHandler {
    records: Mutex<VecDeque<LogRecord>>,
    capacity: usize,
}

impl MemoryHandler {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// A handler retaining at most `capacity` records (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::new()),
            capacity: capacity.max(1),
        }
    }

    /// Remove and return the most recently published record.
    pub fn pop_newest(&self) -> Option<LogRecord> {
        self.records.lock().pop_back()
    }

    /// Remove and return the oldest retained record.
    pub fn pop_oldest(&self) -> Option<LogRecord> {
        self.records.lock().pop_front()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }

    /// Snapshot of the retained records, oldest first.
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records.lock().iter().cloned().collect()
    }
}

impl Default for MemoryHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for MemoryHandler {
    fn publish(&self, record: &LogRecord) -> Result<()> {
        let mut records = self.records.lock();
        if records.len() == self.capacity {
            records.pop_front();
        }
        records.push_back(record.clone());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
