//! Facade types: severities, messages, status events, and thread context

pub mod message;
pub mod severity;
pub mod status;
pub mod thread_context;

pub use message::{default_factory, DefaultMessageFactory, Marker, Message, MessageFactory};
pub use severity::Severity;
pub use status::{ListenerId, StatusBus, StatusEvent, StatusListener};
pub use thread_context::{DefaultContextMap, ThreadContextMap};
