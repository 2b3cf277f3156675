//! Namespace trees and ambient scope resolution
//!
//! A `Namespace` interns one [`LoggerNode`] per dotted name and owns the tree
//! root. A `NamespaceStore` holds the default namespace plus one namespace per
//! scope key, and resolves the "current" namespace through a per-thread
//! ambient scope slot with an RAII guard for temporary switches.

use super::node::LoggerNode;
use parking_lot::Mutex;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock};

/// Identity of an isolation domain sharing one backend namespace store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(Arc<str>);

impl ScopeId {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScopeId {
    fn from(name: &str) -> Self {
        ScopeId::new(name)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A hierarchical tree of logger nodes, interned by dotted name.
pub struct Namespace {
    root: Arc<LoggerNode>,
    nodes: Mutex<HashMap<String, Arc<LoggerNode>>>,
}

impl Namespace {
    pub fn new() -> Self {
        let root = Arc::new(LoggerNode::new("", None));
        let mut nodes = HashMap::new();
        nodes.insert(String::new(), Arc::clone(&root));
        Self {
            root,
            nodes: Mutex::new(nodes),
        }
    }

    /// The tree root (the node named "").
    pub fn root(&self) -> Arc<LoggerNode> {
        Arc::clone(&self.root)
    }

    /// Get or create the node for `name`, creating any missing ancestors.
    ///
    /// The same name always returns the same instance.
    pub fn node(&self, name: &str) -> Arc<LoggerNode> {
        if name.is_empty() {
            return self.root();
        }
        let mut nodes = self.nodes.lock();
        self.intern(&mut nodes, name)
    }

    fn intern(
        &self,
        nodes: &mut HashMap<String, Arc<LoggerNode>>,
        name: &str,
    ) -> Arc<LoggerNode> {
        if let Some(node) = nodes.get(name) {
            return Arc::clone(node);
        }
        let parent = match name.rfind('.') {
            Some(idx) => self.intern(nodes, &name[..idx]),
            None => Arc::clone(&self.root),
        };
        let node = Arc::new(LoggerNode::new(name, Some(parent)));
        nodes.insert(name.to_string(), Arc::clone(&node));
        node
    }
}

impl Default for Namespace {
    fn default() -> Self {
        Self::new()
    }
}

// The ambient scope is a property of the thread, not of any one store; every
// store consults the same slot and resolves it against its own namespaces.
thread_local! {
    static CURRENT_SCOPE: RefCell<Option<ScopeId>> = const { RefCell::new(None) };
}

/// Holds the default namespace and one namespace per scope key.
pub struct NamespaceStore {
    default_ns: Arc<Namespace>,
    scoped: Mutex<HashMap<ScopeId, Arc<Namespace>>>,
}

impl NamespaceStore {
    pub fn new() -> Self {
        Self {
            default_ns: Arc::new(Namespace::new()),
            scoped: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide store.
    pub fn global() -> Arc<NamespaceStore> {
        static STORE: LazyLock<Arc<NamespaceStore>> =
            LazyLock::new(|| Arc::new(NamespaceStore::new()));
        Arc::clone(&STORE)
    }

    pub fn default_namespace(&self) -> Arc<Namespace> {
        Arc::clone(&self.default_ns)
    }

    /// Get or create the namespace for `scope`.
    pub fn namespace(&self, scope: &ScopeId) -> Arc<Namespace> {
        let mut scoped = self.scoped.lock();
        Arc::clone(
            scoped
                .entry(scope.clone())
                .or_insert_with(|| Arc::new(Namespace::new())),
        )
    }

    /// Resolve the namespace for the calling thread's ambient scope, falling
    /// back to the default namespace when no scope is set.
    pub fn current(&self) -> Arc<Namespace> {
        CURRENT_SCOPE.with(|slot| match slot.borrow().as_ref() {
            Some(scope) => self.namespace(scope),
            None => Arc::clone(&self.default_ns),
        })
    }

    /// The calling thread's ambient scope, if one is set.
    pub fn current_scope() -> Option<ScopeId> {
        CURRENT_SCOPE.with(|slot| slot.borrow().clone())
    }

    /// Switch the calling thread's ambient scope until the returned guard is
    /// dropped. The prior scope is restored on every exit path, including
    /// unwinds.
    pub fn enter_scope(&self, scope: &ScopeId) -> ScopeGuard {
        let previous = CURRENT_SCOPE.with(|slot| slot.replace(Some(scope.clone())));
        ScopeGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Default for NamespaceStore {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard restoring the prior ambient scope on drop.
///
/// Not `Send`: the guard must be dropped on the thread whose slot it saved.
#[must_use = "the prior scope is restored when the guard is dropped"]
pub struct ScopeGuard {
    previous: Option<ScopeId>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_SCOPE.with(|slot| *slot.borrow_mut() = previous);
    }
}
