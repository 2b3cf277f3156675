//! Backend log record structure

use super::level::BackendLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::sync::Arc;

// Thread-local cache for thread information to avoid repeated allocations
thread_local! {
    static THREAD_INFO_CACHE: RefCell<Option<(String, Option<String>)>> = const { RefCell::new(None) };
}

/// Get cached (thread id, thread name), computing it on first access
fn thread_info() -> (String, Option<String>) {
    THREAD_INFO_CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if cache.is_none() {
            let current = std::thread::current();
            *cache = Some((
                format!("{:?}", current.id()),
                current.name().map(String::from),
            ));
        }
        cache.clone().unwrap_or_default()
    })
}

/// A record submitted to the backend logger tree.
///
/// Carries the translated level, the already-formatted message text, and the
/// diagnostic context captured at emission time. The attached cause is not
/// serialized; handlers render it through [`LogRecord::cause_text`].
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: BackendLevel,
    pub message: String,
    pub logger_name: String,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_name: Option<String>,
    /// The API layer that produced the call, for caller diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Snapshot of the thread's key/value diagnostic context
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub mdc: HashMap<String, String>,
    /// The thread's diagnostic stack flattened into a single string
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ndc: String,
    #[serde(skip)]
    pub cause: Option<Arc<dyn Error + Send + Sync>>,
}

impl LogRecord {
    /// Sanitize the message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so a crafted message cannot forge additional records.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(
        level: BackendLevel,
        message: impl Into<String>,
        logger_name: impl Into<String>,
    ) -> Self {
        let (thread_id, thread_name) = thread_info();
        Self {
            level,
            message: Self::sanitize_message(&message.into()),
            logger_name: logger_name.into(),
            timestamp: Utc::now(),
            thread_id,
            thread_name,
            origin: None,
            mdc: HashMap::new(),
            ndc: String::new(),
            cause: None,
        }
    }

    pub fn with_origin(mut self, origin: &str) -> Self {
        self.origin = Some(origin.to_string());
        self
    }

    pub fn with_mdc(mut self, mdc: HashMap<String, String>) -> Self {
        self.mdc = mdc;
        self
    }

    pub fn with_ndc(mut self, ndc: String) -> Self {
        self.ndc = ndc;
        self
    }

    pub fn with_cause(mut self, cause: Arc<dyn Error + Send + Sync>) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Render the cause and its source chain, if any
    pub fn cause_text(&self) -> Option<String> {
        let cause = self.cause.as_ref()?;
        let mut text = cause.to_string();
        let mut source = cause.source();
        while let Some(err) = source {
            text.push_str(": caused by: ");
            text.push_str(&err.to_string());
            source = err.source();
        }
        Some(text)
    }
}
