//! Thread-local key/value diagnostic context
//!
//! The backend's mapped diagnostic context. Values put here on a thread are
//! snapshotted into records emitted from that thread; other threads never see
//! them.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static MDC: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}

pub fn get(key: &str) -> Option<String> {
    MDC.with(|map| map.borrow().get(key).cloned())
}

/// Insert a value, returning the prior value for the key if one was set.
pub fn put(key: impl Into<String>, value: impl Into<String>) -> Option<String> {
    MDC.with(|map| map.borrow_mut().insert(key.into(), value.into()))
}

pub fn remove(key: &str) -> Option<String> {
    MDC.with(|map| map.borrow_mut().remove(key))
}

pub fn clear() {
    MDC.with(|map| map.borrow_mut().clear());
}

/// Snapshot the calling thread's map.
pub fn copy() -> HashMap<String, String> {
    MDC.with(|map| map.borrow().clone())
}

pub fn is_empty() -> bool {
    MDC.with(|map| map.borrow().is_empty())
}
