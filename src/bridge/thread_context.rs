//! Thread-context storage adapter
//!
//! Routes the facade's key/value thread context into the backend's MDC so
//! both APIs observe one per-thread map. Installed process-wide by
//! [`BridgeProvider`](super::provider::BridgeProvider).

use crate::backend::mdc;
use crate::facade::ThreadContextMap;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct MdcContextMap;

impl MdcContextMap {
    pub fn new() -> Self {
        Self
    }
}

impl ThreadContextMap for MdcContextMap {
    fn put(&self, key: &str, value: Option<&str>) {
        match value {
            Some(value) => {
                mdc::put(key, value);
            }
            None => {
                mdc::remove(key);
            }
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        mdc::get(key)
    }

    fn remove(&self, key: &str) {
        mdc::remove(key);
    }

    fn clear(&self) {
        mdc::clear();
    }

    fn copy(&self) -> HashMap<String, String> {
        mdc::copy()
    }

    fn is_empty(&self) -> bool {
        mdc::is_empty()
    }
}
