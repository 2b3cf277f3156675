//! Internal status events
//!
//! The bridge reports on its own operation (rejected configuration, cache
//! collisions) through status events, distinct from application records.
//! Listeners subscribe to a `StatusBus`; each listener gates delivery with
//! its own severity threshold.

use super::severity::Severity;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

/// An internal diagnostic message about the bridge's own operation.
#[derive(Debug, Clone)]
pub struct StatusEvent {
    pub severity: Severity,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl StatusEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            timestamp: Utc::now(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: Arc<dyn Error + Send + Sync>) -> Self {
        self.cause = Some(cause);
        self
    }
}

/// Receives status events published on a bus.
pub trait StatusListener: Send + Sync {
    fn log(&self, event: &StatusEvent);

    /// Least severity this listener wants delivered.
    fn status_level(&self) -> Severity;

    /// Release any resources held by the listener; idempotent.
    fn close(&self) {}
}

/// Registration token returned by [`StatusBus::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Fan-out point for status events.
///
/// With no listeners registered, warning-or-worse events fall back to stderr
/// so misconfiguration is never silent.
pub struct StatusBus {
    listeners: RwLock<Vec<(ListenerId, Arc<dyn StatusListener>)>>,
    next_id: AtomicU64,
}

impl StatusBus {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// The process-wide bus.
    pub fn global() -> Arc<StatusBus> {
        static BUS: LazyLock<Arc<StatusBus>> = LazyLock::new(|| Arc::new(StatusBus::new()));
        Arc::clone(&BUS)
    }

    /// Register a listener and return its token.
    pub fn register(&self, listener: Arc<dyn StatusListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    /// Remove the listener registered under `id`. Returns whether a listener
    /// was removed. Does not close the listener; that stays with whoever owns
    /// its lifecycle.
    pub fn unregister(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `event` to every listener whose threshold admits it.
    ///
    /// Listeners are snapshotted before delivery so a listener that re-enters
    /// the bus cannot deadlock on the listener list.
    pub fn publish(&self, event: StatusEvent) {
        let snapshot: Vec<Arc<dyn StatusListener>> = {
            let listeners = self.listeners.read();
            listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        if snapshot.is_empty() {
            if event.severity >= Severity::Warn {
                match &event.cause {
                    Some(cause) => {
                        eprintln!("[LOGBRIDGE] {}: {} ({})", event.severity, event.message, cause)
                    }
                    None => eprintln!("[LOGBRIDGE] {}: {}", event.severity, event.message),
                }
            }
            return;
        }

        for listener in snapshot {
            if event.severity >= listener.status_level() {
                listener.log(&event);
            }
        }
    }

    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        self.publish(StatusEvent::new(severity, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>, cause: Arc<dyn Error + Send + Sync>) {
        self.publish(StatusEvent::new(Severity::Error, message).with_cause(cause));
    }
}

impl Default for StatusBus {
    fn default() -> Self {
        Self::new()
    }
}
