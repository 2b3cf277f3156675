//! Messages, message factories, and markers
//!
//! Facade callers hand the bridge fully formatted text; `Message` is the
//! carrier and `MessageFactory` the pluggable construction point whose
//! concrete type identity participates in logger cache keys.

use serde::{Deserialize, Serialize};
use std::any::TypeId;
use std::fmt;
use std::sync::{Arc, LazyLock};

/// A fully formatted log message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    text: String,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The formatted text carried by this message.
    pub fn formatted(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::new(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::new(text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Builds [`Message`] values for a logger.
///
/// Factories of the same concrete type are interchangeable; the concrete type
/// is the identity used when keying logger caches, so two factories of
/// different types under the same logger name yield separately cached loggers.
pub trait MessageFactory: Send + Sync + 'static {
    fn new_message(&self, text: &str) -> Message;

    /// Identity used for cache keying; defaults to the concrete type.
    fn identity(&self) -> TypeId {
        TypeId::of::<Self>()
    }
}

/// The stock factory: wraps the text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessageFactory;

impl MessageFactory for DefaultMessageFactory {
    fn new_message(&self, text: &str) -> Message {
        Message::new(text)
    }
}

/// Shared instance of the stock factory.
pub fn default_factory() -> Arc<dyn MessageFactory> {
    static FACTORY: LazyLock<Arc<DefaultMessageFactory>> =
        LazyLock::new(|| Arc::new(DefaultMessageFactory));
    Arc::clone(&*FACTORY) as Arc<dyn MessageFactory>
}

/// A named tag accepted by the logging API for interface conformance.
///
/// Markers do not affect enablement decisions and are not carried into
/// backend records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    name: String,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
