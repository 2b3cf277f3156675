//! Facade thread-context API
//!
//! Per-thread diagnostic data attached to emitted records: a key/value map
//! and a stack of context frames. Map storage is pluggable so a backend
//! bridge can install its own [`ThreadContextMap`] once at startup; the stack
//! is owned by the facade.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Pluggable storage for the thread-context map.
pub trait ThreadContextMap: Send + Sync {
    /// Insert a value; a `None` value removes the key instead.
    fn put(&self, key: &str, value: Option<&str>);
    fn get(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
    fn clear(&self);
    fn copy(&self) -> HashMap<String, String>;
    fn is_empty(&self) -> bool;
}

thread_local! {
    static LOCAL_MAP: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
    static LOCAL_STACK: RefCell<Vec<String>> = RefCell::new(Vec::new());
}

/// Thread-local map used unless a bridge installs its own storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultContextMap;

impl ThreadContextMap for DefaultContextMap {
    fn put(&self, key: &str, value: Option<&str>) {
        LOCAL_MAP.with(|map| match value {
            Some(value) => {
                map.borrow_mut().insert(key.to_string(), value.to_string());
            }
            None => {
                map.borrow_mut().remove(key);
            }
        });
    }

    fn get(&self, key: &str) -> Option<String> {
        LOCAL_MAP.with(|map| map.borrow().get(key).cloned())
    }

    fn remove(&self, key: &str) {
        LOCAL_MAP.with(|map| {
            map.borrow_mut().remove(key);
        });
    }

    fn clear(&self) {
        LOCAL_MAP.with(|map| map.borrow_mut().clear());
    }

    fn copy(&self) -> HashMap<String, String> {
        LOCAL_MAP.with(|map| map.borrow().clone())
    }

    fn is_empty(&self) -> bool {
        LOCAL_MAP.with(|map| map.borrow().is_empty())
    }
}

static INSTALLED: OnceLock<Arc<dyn ThreadContextMap>> = OnceLock::new();

fn map() -> &'static Arc<dyn ThreadContextMap> {
    INSTALLED.get_or_init(|| Arc::new(DefaultContextMap))
}

/// Install `storage` as the process-wide map. The first installation wins;
/// returns false when storage was already installed (or defaulted).
pub fn install_map(storage: Arc<dyn ThreadContextMap>) -> bool {
    INSTALLED.set(storage).is_ok()
}

pub fn put(key: &str, value: &str) {
    map().put(key, Some(value));
}

pub fn get(key: &str) -> Option<String> {
    map().get(key)
}

pub fn remove(key: &str) {
    map().remove(key);
}

pub fn clear_map() {
    map().clear();
}

/// Snapshot of the calling thread's map.
pub fn copy() -> HashMap<String, String> {
    map().copy()
}

pub fn is_empty() -> bool {
    map().is_empty()
}

pub fn push(frame: impl Into<String>) {
    LOCAL_STACK.with(|stack| stack.borrow_mut().push(frame.into()));
}

pub fn pop() -> Option<String> {
    LOCAL_STACK.with(|stack| stack.borrow_mut().pop())
}

pub fn peek() -> Option<String> {
    LOCAL_STACK.with(|stack| stack.borrow().last().cloned())
}

pub fn depth() -> usize {
    LOCAL_STACK.with(|stack| stack.borrow().len())
}

/// Keep only the bottom `depth` frames.
pub fn trim(depth: usize) {
    LOCAL_STACK.with(|stack| stack.borrow_mut().truncate(depth));
}

/// Snapshot of the stack, bottom frame first.
pub fn stack() -> Vec<String> {
    LOCAL_STACK.with(|stack| stack.borrow().clone())
}

pub fn clear_stack() {
    LOCAL_STACK.with(|stack| stack.borrow_mut().clear());
}

pub fn clear_all() {
    clear_map();
    clear_stack();
}
