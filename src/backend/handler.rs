//! Handler trait for record output destinations

use super::record::LogRecord;
use crate::error::Result;

/// Output destination for backend records.
///
/// Handlers are attached to nodes and shared across the tree, so they are
/// invoked concurrently from any logging thread; implementations keep their
/// state behind interior mutability.
pub trait Handler: Send + Sync {
    fn publish(&self, record: &LogRecord) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
