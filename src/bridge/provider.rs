//! Provider wiring
//!
//! The one-call entry point binding the facade to the backend: installs the
//! MDC-backed thread-context storage and hands back the process-wide context
//! registry.

use super::registry::ContextRegistry;
use super::thread_context::MdcContextMap;
use crate::facade::thread_context;
use std::sync::Arc;

pub struct BridgeProvider;

impl BridgeProvider {
    /// Install the bridge as the facade's runtime.
    ///
    /// Idempotent: later calls return the same registry, and the storage
    /// installation keeps whichever map won the first install. Call this
    /// before any thread-context use so the bridge's storage is the one that
    /// wins.
    pub fn install() -> &'static ContextRegistry {
        thread_context::install_map(Arc::new(MdcContextMap::new()));
        ContextRegistry::global()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_is_idempotent() {
        let first = BridgeProvider::install();
        let second = BridgeProvider::install();
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(first, ContextRegistry::global()));
    }
}
