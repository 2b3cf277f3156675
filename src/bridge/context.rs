//! Bridge context
//!
//! A context caches [`BridgeLogger`] facades over one backend namespace and
//! carries an auxiliary object map for caller state. Loggers are keyed by
//! name plus message-factory identity, so the same name requested with
//! different factories yields separately cached facades rather than a
//! silently reconfigured one.

use super::logger::BridgeLogger;
use super::registry::ContextKey;
use crate::backend::Namespace;
use crate::facade::{default_factory, MessageFactory, StatusBus};
use parking_lot::Mutex;
use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Cache key for logger facades. `factory` is `None` for loggers requested
/// without an explicit factory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoggerKey {
    name: Arc<str>,
    factory: Option<TypeId>,
}

impl LoggerKey {
    pub fn new(name: &str, factory: Option<TypeId>) -> Self {
        Self {
            name: Arc::from(name),
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factory(&self) -> Option<TypeId> {
        self.factory
    }
}

type SharedObject = Arc<dyn Any + Send + Sync>;

pub struct BridgeContext {
    namespace: Arc<Namespace>,
    external_key: Option<ContextKey>,
    loggers: Mutex<HashMap<LoggerKey, Arc<BridgeLogger>>>,
    objects: Arc<Mutex<HashMap<String, SharedObject>>>,
    status_bus: Arc<StatusBus>,
}

impl BridgeContext {
    pub(crate) fn new(
        namespace: Arc<Namespace>,
        external_key: Option<ContextKey>,
        status_bus: Arc<StatusBus>,
    ) -> Self {
        Self {
            namespace,
            external_key,
            loggers: Mutex::new(HashMap::new()),
            objects: Arc::new(Mutex::new(HashMap::new())),
            status_bus,
        }
    }

    pub fn namespace(&self) -> &Arc<Namespace> {
        &self.namespace
    }

    pub fn external_key(&self) -> Option<&ContextKey> {
        self.external_key.as_ref()
    }

    /// Get or create the logger for `name` with the shared default factory.
    pub fn get_logger(&self, name: &str) -> Arc<BridgeLogger> {
        self.logger_for(LoggerKey::new(name, None), None)
    }

    /// Get or create the logger for `name` bound to `factory`.
    ///
    /// When `name` is already cached under a different factory identity, the
    /// request still succeeds with its own separately cached facade, and the
    /// divergence is reported as a warning status event.
    pub fn get_logger_with_factory(
        &self,
        name: &str,
        factory: Arc<dyn MessageFactory>,
    ) -> Arc<BridgeLogger> {
        let key = LoggerKey::new(name, Some(factory.identity()));
        self.logger_for(key, Some(factory))
    }

    fn logger_for(
        &self,
        key: LoggerKey,
        factory: Option<Arc<dyn MessageFactory>>,
    ) -> Arc<BridgeLogger> {
        let mut mismatch = false;
        let logger = {
            let mut loggers = self.loggers.lock();
            if let Some(existing) = loggers.get(&key) {
                return Arc::clone(existing);
            }
            if key.factory.is_some() {
                mismatch = loggers
                    .keys()
                    .any(|cached| cached.name == key.name && cached.factory != key.factory);
            }
            let node = self.namespace.node(&key.name);
            let factory = factory.unwrap_or_else(default_factory);
            let logger = Arc::new(BridgeLogger::new(node, factory));
            loggers.insert(key.clone(), Arc::clone(&logger));
            logger
        };
        // report outside the cache lock; the bus may fan out to a relay that
        // logs through this same context
        if mismatch {
            self.status_bus.warn(format!(
                "logger '{}' requested with a message factory differing from an \
                 earlier registration, caching it separately",
                key.name
            ));
        }
        logger
    }

    /// Whether a logger named `name` is cached, under any factory.
    pub fn has_logger(&self, name: &str) -> bool {
        self.loggers
            .lock()
            .keys()
            .any(|key| key.name.as_ref() == name)
    }

    /// Whether `name` is cached under exactly `factory`'s identity.
    pub fn has_logger_with_factory(&self, name: &str, factory: &dyn MessageFactory) -> bool {
        self.has_logger_with_factory_type(name, Some(factory.identity()))
    }

    /// Whether `name` is cached under exactly the given factory identity.
    /// `None` matches only loggers created without an explicit factory.
    pub fn has_logger_with_factory_type(&self, name: &str, factory: Option<TypeId>) -> bool {
        self.loggers.lock().contains_key(&LoggerKey::new(name, factory))
    }

    pub fn get_object(&self, key: &str) -> Option<SharedObject> {
        self.objects.lock().get(key).cloned()
    }

    /// Store `value` under `key`, returning the displaced value if any.
    pub fn put_object(&self, key: impl Into<String>, value: SharedObject) -> Option<SharedObject> {
        self.objects.lock().insert(key.into(), value)
    }

    /// Store `value` only when `key` is vacant. Returns the incumbent value
    /// when one was present, `None` when the insert happened.
    pub fn put_object_if_absent(
        &self,
        key: impl Into<String>,
        value: SharedObject,
    ) -> Option<SharedObject> {
        let mut objects = self.objects.lock();
        match objects.entry(key.into()) {
            Entry::Occupied(entry) => Some(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                entry.insert(value);
                None
            }
        }
    }

    pub fn remove_object(&self, key: &str) -> Option<SharedObject> {
        self.objects.lock().remove(key)
    }

    /// Remove `key` only when it currently holds exactly `expected` (the same
    /// allocation, not an equal-looking value). Returns whether a removal
    /// happened.
    pub fn remove_object_expected(&self, key: &str, expected: &SharedObject) -> bool {
        let mut objects = self.objects.lock();
        match objects.get(key) {
            Some(current) if std::ptr::addr_eq(Arc::as_ptr(current), Arc::as_ptr(expected)) => {
                objects.remove(key);
                true
            }
            _ => false,
        }
    }
}

/// Two contexts are the same logical context when they wrap the same backend
/// root under the same external key and share one object map. A rebuilt
/// context over the same root is deliberately not equal to its predecessor.
impl PartialEq for BridgeContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.namespace.root(), &other.namespace.root())
            && self.external_key == other.external_key
            && Arc::ptr_eq(&self.objects, &other.objects)
    }
}

impl Eq for BridgeContext {}

impl fmt::Debug for BridgeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BridgeContext")
            .field("external_key", &self.external_key)
            .field("cached_loggers", &self.loggers.lock().len())
            .finish_non_exhaustive()
    }
}
