//! Logger nodes
//!
//! One node per dotted name in a namespace tree. A node carries an optional
//! configured level (the effective level is inherited from the nearest
//! configured ancestor), a handler list, and generic attachment slots used by
//! the bridge to anchor per-root state.

use super::attachments::{AttachmentKey, Attachments};
use super::handler::Handler;
use super::level::BackendLevel;
use super::record::LogRecord;
use parking_lot::RwLock;
use std::sync::Arc;

/// Effective level when no node on the parent chain configures one.
pub const DEFAULT_ROOT_LEVEL: BackendLevel = BackendLevel::INFO;

pub struct LoggerNode {
    name: String,
    parent: Option<Arc<LoggerNode>>,
    level: RwLock<Option<BackendLevel>>,
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
    attachments: Attachments,
}

impl LoggerNode {
    pub(crate) fn new(name: impl Into<String>, parent: Option<Arc<LoggerNode>>) -> Self {
        Self {
            name: name.into(),
            parent,
            level: RwLock::new(None),
            handlers: RwLock::new(Vec::new()),
            attachments: Attachments::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The level configured on this node itself, if any.
    pub fn level(&self) -> Option<BackendLevel> {
        *self.level.read()
    }

    pub fn set_level(&self, level: Option<BackendLevel>) {
        *self.level.write() = level;
    }

    /// The level governing this node: its own if configured, otherwise the
    /// nearest configured ancestor's, otherwise [`DEFAULT_ROOT_LEVEL`].
    pub fn effective_level(&self) -> BackendLevel {
        if let Some(level) = *self.level.read() {
            return level;
        }
        let mut current = self.parent.clone();
        while let Some(node) = current {
            if let Some(level) = *node.level.read() {
                return level;
            }
            current = node.parent.clone();
        }
        DEFAULT_ROOT_LEVEL
    }

    /// Whether a record at `level` would be published by this node.
    ///
    /// An effective level of OFF blocks everything; otherwise the record's
    /// rank must be at or above the effective level's rank.
    pub fn is_loggable(&self, level: BackendLevel) -> bool {
        let effective = self.effective_level();
        effective != BackendLevel::OFF && level.value() >= effective.value()
    }

    pub fn add_handler(&self, handler: Arc<dyn Handler>) {
        self.handlers.write().push(handler);
    }

    pub fn clear_handlers(&self) {
        self.handlers.write().clear();
    }

    /// Submit a record: if loggable, publish it to this node's handlers and
    /// to every ancestor's handlers. Never fails; handler errors and panics
    /// are isolated per handler and reported to stderr.
    pub fn log(&self, record: LogRecord) {
        if !self.is_loggable(record.level) {
            return;
        }
        self.publish_to_handlers(&record);
        let mut current = self.parent.clone();
        while let Some(node) = current {
            node.publish_to_handlers(&record);
            current = node.parent.clone();
        }
    }

    /// Per-handler panic isolation: one failing handler must not disrupt the
    /// others or unwind into the caller's logging path.
    fn publish_to_handlers(&self, record: &LogRecord) {
        let handlers = self.handlers.read();
        for handler in handlers.iter() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                handler.publish(record)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!("[LOGBRIDGE ERROR] Handler '{}' failed: {}", handler.name(), e);
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGBRIDGE CRITICAL] Handler '{}' panicked: {}. \
                         Other handlers continue to function.",
                        handler.name(),
                        panic_msg
                    );
                }
            }
        }
    }

    /// Flush this node's handlers, with the same per-handler isolation.
    pub fn flush(&self) {
        let handlers = self.handlers.read();
        for handler in handlers.iter() {
            let result =
                std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handler.flush()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGBRIDGE ERROR] Handler '{}' flush failed: {}",
                        handler.name(),
                        e
                    );
                }
                Err(_) => {
                    eprintln!(
                        "[LOGBRIDGE CRITICAL] Handler '{}' panicked during flush. \
                         Other handlers continue to function.",
                        handler.name()
                    );
                }
            }
        }
    }

    pub fn attachment<T: Send + Sync + 'static>(&self, key: &AttachmentKey<T>) -> Option<Arc<T>> {
        self.attachments.get(key)
    }

    pub fn attach<T: Send + Sync + 'static>(
        &self,
        key: &AttachmentKey<T>,
        value: Arc<T>,
    ) -> Option<Arc<T>> {
        self.attachments.attach(key, value)
    }

    pub fn attach_if_absent<T: Send + Sync + 'static>(
        &self,
        key: &AttachmentKey<T>,
        value: Arc<T>,
    ) -> Arc<T> {
        self.attachments.attach_if_absent(key, value)
    }

    pub fn detach<T: Send + Sync + 'static>(&self, key: &AttachmentKey<T>) -> Option<Arc<T>> {
        self.attachments.detach(key)
    }
}
