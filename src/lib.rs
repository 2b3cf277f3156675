//! # Logbridge
//!
//! A logging bridge binding a named-severity facade API onto a hierarchical
//! backend logger tree, with explicit level translation, per-scope context
//! registries, and diagnostic context propagation.
//!
//! ## Features
//!
//! - **Two-Scale Level Translation**: Explicit mapping tables with a
//!   nearest-rank floor for custom backend levels
//! - **Concurrent Context Registry**: Contexts cached on the backend tree
//!   itself, created lazily and torn down symmetrically
//! - **Diagnostic Context**: Facade thread-context map and stack captured
//!   into every record, backed by the backend MDC
//! - **Status Relay**: The facade's own diagnostics routed into the backend
//!   it is bridging to

pub mod backend;
pub mod bridge;
pub mod error;
pub mod facade;
pub mod handlers;

pub mod prelude {
    pub use crate::backend::{BackendLevel, LogRecord, LoggerNode, Namespace, NamespaceStore};
    pub use crate::bridge::{
        BridgeContext, BridgeLogger, BridgeProvider, ContextKey, ContextRegistry, LevelTranslator,
    };
    pub use crate::error::{BridgeError, Result};
    pub use crate::facade::{Marker, Message, MessageFactory, Severity, StatusBus};
    #[cfg(feature = "console")]
    pub use crate::handlers::ConsoleHandler;
    pub use crate::handlers::MemoryHandler;
}

pub use backend::{
    AttachmentKey, BackendLevel, Handler, LogRecord, LoggerNode, Namespace, NamespaceStore,
    ScopeGuard, ScopeId, DEFAULT_ROOT_LEVEL,
};
pub use bridge::{
    BridgeContext, BridgeLogger, BridgeProvider, ContextKey, ContextRegistry, LevelTranslator,
    MdcContextMap, StatusRelay, DEFAULT_BACKEND_LEVEL, DEFAULT_FACADE_LEVEL, STATUS_LOGGER_NAME,
};
pub use error::{BridgeError, Result};
pub use facade::{
    default_factory, DefaultMessageFactory, Marker, Message, MessageFactory, Severity, StatusBus,
    StatusEvent, StatusListener, ThreadContextMap,
};
#[cfg(feature = "console")]
pub use handlers::{ConsoleFormat, ConsoleHandler};
pub use handlers::MemoryHandler;
