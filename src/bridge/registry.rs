//! Context registry
//!
//! Process-wide factory for [`BridgeContext`] instances. Contexts are cached
//! on the backend namespace root itself, in a typed attachment slot, so their
//! lifetime follows the backend tree rather than this crate's statics. The
//! first context created against a root also anchors a [`StatusRelay`] there
//! and registers it with the status bus.

use super::context::BridgeContext;
use super::relay::StatusRelay;
use crate::backend::{AttachmentKey, LoggerNode, Namespace, NamespaceStore, ScopeId};
use crate::facade::{StatusBus, StatusListener};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};

/// Opaque identity separating contexts that share a namespace root.
///
/// Callers that need isolated logger caches within one backend tree pass
/// distinct keys; `None` selects the shared default context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextKey(Arc<str>);

impl ContextKey {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContextKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-root context table, stored as an attachment on the root node.
#[derive(Default)]
struct RegistryEntry {
    contexts: Mutex<HashMap<Option<ContextKey>, Arc<BridgeContext>>>,
}

static CONTEXTS_KEY: LazyLock<AttachmentKey<RegistryEntry>> = LazyLock::new(AttachmentKey::new);
static RELAY_KEY: LazyLock<AttachmentKey<StatusRelay>> = LazyLock::new(AttachmentKey::new);

/// Slot under which the per-root status relay is anchored. The relay detaches
/// itself through this key when closed.
pub(crate) fn relay_key() -> &'static AttachmentKey<StatusRelay> {
    &RELAY_KEY
}

pub struct ContextRegistry {
    store: Arc<NamespaceStore>,
    status_bus: Arc<StatusBus>,
}

impl ContextRegistry {
    pub fn new(store: Arc<NamespaceStore>, status_bus: Arc<StatusBus>) -> Self {
        Self { store, status_bus }
    }

    /// The process-wide registry over the global namespace store and bus.
    pub fn global() -> &'static ContextRegistry {
        static REGISTRY: LazyLock<ContextRegistry> = LazyLock::new(|| {
            ContextRegistry::new(NamespaceStore::global(), StatusBus::global())
        });
        &REGISTRY
    }

    pub fn store(&self) -> &Arc<NamespaceStore> {
        &self.store
    }

    pub fn status_bus(&self) -> &Arc<StatusBus> {
        &self.status_bus
    }

    /// Resolve (creating on first use) the context for the given scope and
    /// key.
    ///
    /// When `use_current_scope` is set, or `scope` is `None`, the calling
    /// thread's ambient scope decides which namespace backs the context.
    /// Otherwise the hinted scope is entered for the duration of the lookup
    /// and the ambient scope is restored before returning.
    pub fn get_context(
        &self,
        scope: Option<&ScopeId>,
        key: Option<&ContextKey>,
        use_current_scope: bool,
    ) -> Arc<BridgeContext> {
        match scope {
            Some(scope) if !use_current_scope => {
                let _guard = self.store.enter_scope(scope);
                let namespace = self.store.current();
                self.context_for(&namespace, key)
            }
            _ => {
                let namespace = self.store.current();
                self.context_for(&namespace, key)
            }
        }
    }

    /// Same resolution as [`get_context`](Self::get_context), with an
    /// external configuration request attached. Configuration is owned by the
    /// backend, so a location is never honored: the context is still resolved
    /// normally and the rejected path is reported as a warning status event.
    pub fn get_context_with_config(
        &self,
        scope: Option<&ScopeId>,
        key: Option<&ContextKey>,
        use_current_scope: bool,
        config_location: Option<&Path>,
        _name: Option<&str>,
    ) -> Arc<BridgeContext> {
        // resolve first so the root's relay exists to observe the warning
        let context = self.get_context(scope, key, use_current_scope);
        if let Some(path) = config_location {
            self.status_bus.warn(format!(
                "configuration through the facade is not supported, ignoring config location {}",
                path.display()
            ));
        }
        context
    }

    fn context_for(&self, namespace: &Arc<Namespace>, key: Option<&ContextKey>) -> Arc<BridgeContext> {
        let root = namespace.root();
        loop {
            let entry = match root.attachment(&CONTEXTS_KEY) {
                Some(entry) => entry,
                None => root.attach_if_absent(&CONTEXTS_KEY, Arc::new(RegistryEntry::default())),
            };
            let mut contexts = entry.contexts.lock();

            // a concurrent removal may have detached this entry between the
            // slot read and taking the lock; re-check and retry so the
            // context we return is the one future lookups will find
            match root.attachment(&CONTEXTS_KEY) {
                Some(current) if Arc::ptr_eq(&current, &entry) => {}
                _ => continue,
            }

            if let Some(existing) = contexts.get(&key.cloned()) {
                return Arc::clone(existing);
            }

            let context = Arc::new(BridgeContext::new(
                Arc::clone(namespace),
                key.cloned(),
                Arc::clone(&self.status_bus),
            ));
            self.ensure_relay(namespace, &root);
            contexts.insert(key.cloned(), Arc::clone(&context));
            return context;
        }
    }

    /// Anchor and register the root's status relay if it is not already
    /// there. Runs inside the entry critical section, so the relay is
    /// registered exactly once and before the first context becomes visible.
    fn ensure_relay(&self, namespace: &Arc<Namespace>, root: &Arc<LoggerNode>) {
        if root.attachment(&RELAY_KEY).is_none() {
            let relay = Arc::new(StatusRelay::new(namespace, Arc::clone(&self.status_bus)));
            let relay = root.attach_if_absent(&RELAY_KEY, relay);
            let id = self
                .status_bus
                .register(Arc::clone(&relay) as Arc<dyn StatusListener>);
            relay.mark_registered(id);
        }
    }

    /// Drop `context` from its root's table. Only the exact registered
    /// context is removed; an equal-looking instance from an earlier
    /// generation is left alone. Removing the last context also tears down
    /// the root's relay.
    pub fn remove_context(&self, context: &Arc<BridgeContext>) {
        let root = context.namespace().root();
        let Some(entry) = root.attachment(&CONTEXTS_KEY) else {
            return;
        };
        let mut contexts = entry.contexts.lock();

        let key = context.external_key().cloned();
        match contexts.get(&key) {
            Some(existing) if **existing == **context => {}
            _ => return,
        }
        contexts.remove(&key);

        if contexts.is_empty() {
            // clear the relay slot before the table: a creator that finds the
            // table absent must also find the relay slot absent, or the next
            // generation would inherit a relay about to be closed
            if let Some(relay) = root.detach(&RELAY_KEY) {
                relay.close();
            }
            root.detach(&CONTEXTS_KEY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_registry() -> ContextRegistry {
        ContextRegistry::new(Arc::new(NamespaceStore::new()), Arc::new(StatusBus::new()))
    }

    #[test]
    fn test_same_key_yields_same_context() {
        let registry = fresh_registry();
        let a = registry.get_context(None, None, false);
        let b = registry.get_context(None, None, false);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_distinct_keys_yield_distinct_contexts() {
        let registry = fresh_registry();
        let default = registry.get_context(None, None, false);
        let keyed = registry.get_context(None, Some(&ContextKey::new("isolated")), false);
        assert!(!Arc::ptr_eq(&default, &keyed));
        assert_ne!(*default, *keyed);

        let keyed_again = registry.get_context(None, Some(&ContextKey::new("isolated")), false);
        assert!(Arc::ptr_eq(&keyed, &keyed_again));
    }

    #[test]
    fn test_first_context_registers_one_relay() {
        let registry = fresh_registry();
        assert_eq!(registry.status_bus().listener_count(), 0);

        registry.get_context(None, None, false);
        assert_eq!(registry.status_bus().listener_count(), 1);

        // more contexts on the same root share the relay
        registry.get_context(None, Some(&ContextKey::new("other")), false);
        assert_eq!(registry.status_bus().listener_count(), 1);
    }

    #[test]
    fn test_scope_hint_selects_namespace() {
        let registry = fresh_registry();
        let default = registry.get_context(None, None, false);
        let scoped = registry.get_context(Some(&ScopeId::new("tenant-a")), None, false);
        assert!(!Arc::ptr_eq(&default, &scoped));
        assert!(!Arc::ptr_eq(
            &default.namespace().root(),
            &scoped.namespace().root()
        ));

        // the hint does not leak into the ambient scope
        let after = registry.get_context(None, None, false);
        assert!(Arc::ptr_eq(&default, &after));
    }

    #[test]
    fn test_use_current_scope_overrides_hint() {
        let registry = fresh_registry();
        let default = registry.get_context(None, None, false);
        let hinted = registry.get_context(Some(&ScopeId::new("tenant-b")), None, true);
        assert!(Arc::ptr_eq(&default, &hinted));
    }

    #[test]
    fn test_remove_context_tears_down() {
        let registry = fresh_registry();
        let context = registry.get_context(None, None, false);
        assert_eq!(registry.status_bus().listener_count(), 1);

        registry.remove_context(&context);
        assert_eq!(registry.status_bus().listener_count(), 0);
        assert!(context
            .namespace()
            .root()
            .attachment(&CONTEXTS_KEY)
            .is_none());

        // second removal of the same instance is a no-op
        registry.remove_context(&context);
        assert_eq!(registry.status_bus().listener_count(), 0);
    }

    #[test]
    fn test_remove_spares_other_contexts() {
        let registry = fresh_registry();
        let default = registry.get_context(None, None, false);
        let keyed = registry.get_context(None, Some(&ContextKey::new("kept")), false);

        registry.remove_context(&default);
        // relay stays while any context remains
        assert_eq!(registry.status_bus().listener_count(), 1);

        let keyed_again = registry.get_context(None, Some(&ContextKey::new("kept")), false);
        assert!(Arc::ptr_eq(&keyed, &keyed_again));
    }

    #[test]
    fn test_remove_ignores_stale_instance() {
        let registry = fresh_registry();
        let first = registry.get_context(None, None, false);
        registry.remove_context(&first);

        let second = registry.get_context(None, None, false);
        assert!(!Arc::ptr_eq(&first, &second));

        // the stale handle no longer matches, so the live context survives
        registry.remove_context(&first);
        let third = registry.get_context(None, None, false);
        assert!(Arc::ptr_eq(&second, &third));
    }

    #[test]
    fn test_recreation_after_removal() {
        let registry = fresh_registry();
        let first = registry.get_context(None, None, false);
        registry.remove_context(&first);
        assert_eq!(registry.status_bus().listener_count(), 0);

        let second = registry.get_context(None, None, false);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(registry.status_bus().listener_count(), 1);
    }

    #[test]
    fn test_config_location_is_rejected_with_warning() {
        let registry = fresh_registry();
        let context = registry.get_context_with_config(
            None,
            None,
            false,
            Some(Path::new("/etc/facade-config.xml")),
            None,
        );

        // the warning travels bus -> relay -> backend status node; verify at
        // least that the context resolved normally and the relay is live
        assert_eq!(registry.status_bus().listener_count(), 1);
        assert!(Arc::ptr_eq(&context, &registry.get_context(None, None, false)));
    }
}
