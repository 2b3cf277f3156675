//! Status relay
//!
//! Forwards the facade's internal status events into the backend tree. One
//! relay lives per namespace root, anchored there by the registry; its
//! threshold is read live from the backend status node so operators change
//! verbosity by reconfiguring the backend alone.

use super::registry::relay_key;
use super::translator::LevelTranslator;
use crate::backend::{LogRecord, LoggerNode, Namespace};
use crate::facade::{ListenerId, Severity, StatusBus, StatusEvent, StatusListener};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

/// Name of the backend node that receives the bridge's own status events.
pub const STATUS_LOGGER_NAME: &str = "logbridge.status";

pub struct StatusRelay {
    status_node: Arc<LoggerNode>,
    root: Weak<LoggerNode>,
    bus: Arc<StatusBus>,
    registration: Mutex<Option<ListenerId>>,
    translator: &'static LevelTranslator,
}

impl StatusRelay {
    pub(crate) fn new(namespace: &Namespace, bus: Arc<StatusBus>) -> Self {
        Self {
            status_node: namespace.node(STATUS_LOGGER_NAME),
            root: Arc::downgrade(&namespace.root()),
            bus,
            registration: Mutex::new(None),
            translator: LevelTranslator::global(),
        }
    }

    pub(crate) fn mark_registered(&self, id: ListenerId) {
        *self.registration.lock() = Some(id);
    }

    /// Whether the relay currently holds a bus registration.
    pub fn is_active(&self) -> bool {
        self.registration.lock().is_some()
    }
}

impl StatusListener for StatusRelay {
    /// Forward the event into the backend status node at the translated
    /// severity, or drop it silently when the node's threshold blocks it.
    fn log(&self, event: &StatusEvent) {
        let level = self.translator.to_backend(Some(event.severity));
        if !self.status_node.is_loggable(level) {
            return;
        }
        let mut record = LogRecord::new(level, event.message.as_str(), STATUS_LOGGER_NAME);
        record.timestamp = event.timestamp;
        if let Some(cause) = &event.cause {
            record = record.with_cause(Arc::clone(cause));
        }
        self.status_node.log(record);
    }

    /// Live translation of the status node's current effective level.
    fn status_level(&self) -> Severity {
        self.translator
            .to_facade(Some(self.status_node.effective_level()))
    }

    /// Unregister from the bus and detach from the namespace root.
    /// Idempotent: closing an already-closed relay is a no-op.
    fn close(&self) {
        if let Some(id) = self.registration.lock().take() {
            self.bus.unregister(id);
        }
        if let Some(root) = self.root.upgrade() {
            root.detach(relay_key());
        }
    }
}
