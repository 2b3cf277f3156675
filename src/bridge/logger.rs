//! Logger facade
//!
//! One facade per (name, message factory) pair, bound to a backend node for
//! its whole lifetime. The facade owns no filtering state of its own: every
//! enablement check and every emission defers to the node after translating
//! the requested severity.

use super::translator::LevelTranslator;
use crate::backend::{LogRecord, LoggerNode};
use crate::facade::{thread_context, Marker, Message, MessageFactory, Severity};
use std::error::Error;
use std::sync::Arc;

/// Origin recorded for calls made through the convenience emitters.
const EMITTER_ORIGIN: &str = module_path!();

pub struct BridgeLogger {
    node: Arc<LoggerNode>,
    factory: Arc<dyn MessageFactory>,
    translator: &'static LevelTranslator,
}

impl BridgeLogger {
    pub(crate) fn new(node: Arc<LoggerNode>, factory: Arc<dyn MessageFactory>) -> Self {
        Self {
            node,
            factory,
            translator: LevelTranslator::global(),
        }
    }

    pub fn name(&self) -> &str {
        self.node.name()
    }

    pub fn message_factory(&self) -> &Arc<dyn MessageFactory> {
        &self.factory
    }

    /// Whether a call at `severity` would currently be emitted.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        self.node
            .is_loggable(self.translator.to_backend(Some(severity)))
    }

    /// Enablement with the full call shape. The marker and cause are accepted
    /// for interface parity but never affect the verdict; only the severity
    /// is consulted.
    pub fn is_enabled_for(
        &self,
        severity: Severity,
        _marker: Option<&Marker>,
        _cause: Option<&(dyn Error + 'static)>,
    ) -> bool {
        self.is_enabled(severity)
    }

    /// The level configured on the bound node, translated to a facade
    /// severity. An unconfigured node reports the translation default rather
    /// than the inherited effective level.
    pub fn level(&self) -> Severity {
        self.translator.to_facade(self.node.level())
    }

    /// Emit one call through the backend.
    ///
    /// A `None` message is a no-op. The marker is accepted for interface
    /// parity but is not carried into the record. The record captures the
    /// calling thread's diagnostic context at this moment: the key/value map
    /// as-is and the stack flattened with `.` separators.
    pub fn log(
        &self,
        origin: &str,
        severity: Severity,
        _marker: Option<&Marker>,
        message: Option<&Message>,
        cause: Option<Arc<dyn Error + Send + Sync>>,
    ) {
        let Some(message) = message else {
            return;
        };
        let level = self.translator.to_backend(Some(severity));
        let mut record =
            LogRecord::new(level, message.formatted(), self.node.name()).with_origin(origin);
        if !thread_context::is_empty() {
            record.mdc = thread_context::copy();
        }
        record.ndc = thread_context::stack().join(".");
        if let Some(cause) = cause {
            record = record.with_cause(cause);
        }
        self.node.log(record);
    }

    pub fn trace(&self, text: &str) {
        self.emit(Severity::Trace, text);
    }

    pub fn debug(&self, text: &str) {
        self.emit(Severity::Debug, text);
    }

    pub fn info(&self, text: &str) {
        self.emit(Severity::Info, text);
    }

    pub fn warn(&self, text: &str) {
        self.emit(Severity::Warn, text);
    }

    pub fn error(&self, text: &str) {
        self.emit(Severity::Error, text);
    }

    pub fn fatal(&self, text: &str) {
        self.emit(Severity::Fatal, text);
    }

    /// Build the message through this logger's factory only when the severity
    /// is enabled, then route it through [`log`](Self::log).
    fn emit(&self, severity: Severity, text: &str) {
        if !self.is_enabled(severity) {
            return;
        }
        let message = self.factory.new_message(text);
        self.log(EMITTER_ORIGIN, severity, None, Some(&message), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendLevel, Handler, Namespace};
    use crate::facade::default_factory;
    use crate::handlers::MemoryHandler;

    fn logger_with_sink(name: &str) -> (Arc<Namespace>, BridgeLogger, Arc<MemoryHandler>) {
        let namespace = Arc::new(Namespace::new());
        let sink = Arc::new(MemoryHandler::new());
        namespace
            .root()
            .add_handler(Arc::clone(&sink) as Arc<dyn Handler>);
        let logger = BridgeLogger::new(namespace.node(name), default_factory());
        (namespace, logger, sink)
    }

    #[test]
    fn test_enablement_follows_backend_threshold() {
        let (ns, logger, _sink) = logger_with_sink("app.web");
        // default effective level is INFO
        assert!(!logger.is_enabled(Severity::Debug));
        assert!(logger.is_enabled(Severity::Info));
        assert!(logger.is_enabled(Severity::Error));

        ns.node("app.web").set_level(Some(BackendLevel::ERROR));
        assert!(!logger.is_enabled(Severity::Warn));
        assert!(logger.is_enabled(Severity::Error));
    }

    #[test]
    fn test_marker_and_cause_do_not_affect_enablement() {
        let (_ns, logger, _sink) = logger_with_sink("app.web");
        let marker = Marker::new("AUDIT");
        let cause: std::io::Error = std::io::Error::other("boom");

        let plain = logger.is_enabled(Severity::Info);
        assert_eq!(
            logger.is_enabled_for(Severity::Info, Some(&marker), Some(&cause)),
            plain
        );
        assert_eq!(logger.is_enabled_for(Severity::Info, None, None), plain);
    }

    #[test]
    fn test_none_message_is_noop() {
        let (_ns, logger, sink) = logger_with_sink("app.web");
        logger.log("test::origin", Severity::Error, None, None, None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_log_captures_context() {
        let (_ns, logger, sink) = logger_with_sink("app.web");
        thread_context::clear_all();
        thread_context::put("user", "alice");
        thread_context::push("req-1");
        thread_context::push("step-2");

        let message = Message::new("handled");
        logger.log("test::origin", Severity::Warn, None, Some(&message), None);
        thread_context::clear_all();

        let record = sink.pop_newest().unwrap();
        assert_eq!(record.level, BackendLevel::WARN);
        assert_eq!(record.message, "handled");
        assert_eq!(record.logger_name, "app.web");
        assert_eq!(record.origin.as_deref(), Some("test::origin"));
        assert_eq!(record.mdc.get("user").map(String::as_str), Some("alice"));
        assert_eq!(record.ndc, "req-1.step-2");
    }

    #[test]
    fn test_empty_context_stays_empty() {
        let (_ns, logger, sink) = logger_with_sink("app.web");
        thread_context::clear_all();

        let message = Message::new("bare");
        logger.log("test::origin", Severity::Info, None, Some(&message), None);

        let record = sink.pop_newest().unwrap();
        assert!(record.mdc.is_empty());
        assert_eq!(record.ndc, "");
    }

    #[test]
    fn test_configured_level_only() {
        let (ns, logger, _sink) = logger_with_sink("app.web");
        // unconfigured node reports the translation default, not the
        // inherited effective level
        assert_eq!(logger.level(), Severity::Debug);

        ns.node("app.web").set_level(Some(BackendLevel::WARN));
        assert_eq!(logger.level(), Severity::Warn);
    }

    #[test]
    fn test_convenience_emitters_use_factory() {
        struct ShoutingFactory;
        impl MessageFactory for ShoutingFactory {
            fn new_message(&self, text: &str) -> Message {
                Message::new(text.to_uppercase())
            }
        }

        let namespace = Arc::new(Namespace::new());
        let sink = Arc::new(MemoryHandler::new());
        namespace
            .root()
            .add_handler(Arc::clone(&sink) as Arc<dyn Handler>);
        let logger = BridgeLogger::new(namespace.node("app"), Arc::new(ShoutingFactory));

        logger.warn("quiet words");
        assert_eq!(sink.pop_newest().unwrap().message, "QUIET WORDS");

        // below threshold: the factory is never consulted
        logger.debug("nothing");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_cause_travels_with_record() {
        let (_ns, logger, sink) = logger_with_sink("app.web");
        let message = Message::new("request failed");
        logger.log(
            "test::origin",
            Severity::Error,
            None,
            Some(&message),
            Some(Arc::new(std::io::Error::other("connection reset"))),
        );

        let record = sink.pop_newest().unwrap();
        assert_eq!(record.cause_text().unwrap(), "connection reset");
    }
}
