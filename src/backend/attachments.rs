//! Typed attachment slots
//!
//! A generic extension point carried by every logger node. Callers mint a
//! process-unique [`AttachmentKey`] and use it to attach shared state to a
//! node, so cache lifetime follows the node rather than any thread or global.

use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_KEY_ID: AtomicU64 = AtomicU64::new(0);

/// A process-unique key identifying one typed slot.
///
/// Each call to [`AttachmentKey::new`] mints a distinct slot; two keys never
/// alias even when their value types match.
pub struct AttachmentKey<T> {
    id: u64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> AttachmentKey<T> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            id: NEXT_KEY_ID.fetch_add(1, Ordering::Relaxed),
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for AttachmentKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AttachmentKey<T> {}

impl<T> fmt::Debug for AttachmentKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachmentKey").field("id", &self.id).finish()
    }
}

/// The slot storage held by a node.
#[derive(Default)]
pub struct Attachments {
    slots: Mutex<HashMap<u64, Arc<dyn Any + Send + Sync>>>,
}

impl Attachments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value attached under `key`, if any.
    pub fn get<T: Send + Sync + 'static>(&self, key: &AttachmentKey<T>) -> Option<Arc<T>> {
        self.slots
            .lock()
            .get(&key.id)
            .cloned()
            .and_then(|value| value.downcast::<T>().ok())
    }

    /// Attach `value` under `key`, returning the prior value if one was set.
    pub fn attach<T: Send + Sync + 'static>(
        &self,
        key: &AttachmentKey<T>,
        value: Arc<T>,
    ) -> Option<Arc<T>> {
        self.slots
            .lock()
            .insert(key.id, value)
            .and_then(|prior| prior.downcast::<T>().ok())
    }

    /// Attach `value` under `key` only if the slot is empty.
    ///
    /// Returns the winning value: the existing attachment when one was already
    /// present, otherwise `value` itself. Concurrent callers all observe the
    /// same winner.
    pub fn attach_if_absent<T: Send + Sync + 'static>(
        &self,
        key: &AttachmentKey<T>,
        value: Arc<T>,
    ) -> Arc<T> {
        let mut slots = self.slots.lock();
        let entry = slots
            .entry(key.id)
            .or_insert_with(|| Arc::clone(&value) as Arc<dyn Any + Send + Sync>);
        Arc::clone(entry).downcast::<T>().unwrap_or(value)
    }

    /// Remove and return the value attached under `key`.
    pub fn detach<T: Send + Sync + 'static>(&self, key: &AttachmentKey<T>) -> Option<Arc<T>> {
        self.slots
            .lock()
            .remove(&key.id)
            .and_then(|prior| prior.downcast::<T>().ok())
    }
}
