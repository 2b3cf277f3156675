//! The bridging layer
//!
//! Everything that joins the facade to the backend: level translation, the
//! context registry and its cached logger facades, the status relay, and the
//! thread-context adapter.

pub mod context;
pub mod logger;
pub mod provider;
pub mod registry;
pub mod relay;
pub mod thread_context;
pub mod translator;

pub use context::{BridgeContext, LoggerKey};
pub use logger::BridgeLogger;
pub use provider::BridgeProvider;
pub use registry::{ContextKey, ContextRegistry};
pub use relay::{StatusRelay, STATUS_LOGGER_NAME};
pub use thread_context::MdcContextMap;
pub use translator::{LevelTranslator, DEFAULT_BACKEND_LEVEL, DEFAULT_FACADE_LEVEL};
