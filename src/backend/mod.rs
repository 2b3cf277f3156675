//! Backend logger tree: levels, nodes, namespaces, records, and handlers

pub mod attachments;
pub mod handler;
pub mod level;
pub mod mdc;
pub mod namespace;
pub mod node;
pub mod record;

pub use attachments::{AttachmentKey, Attachments};
pub use handler::Handler;
pub use level::BackendLevel;
pub use namespace::{Namespace, NamespaceStore, ScopeGuard, ScopeId};
pub use node::{LoggerNode, DEFAULT_ROOT_LEVEL};
pub use record::LogRecord;
