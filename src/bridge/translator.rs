//! Level translation between the facade and backend scales
//!
//! The two scales share no numeric relationship, so translation goes through
//! fixed lookup tables built once at construction. Backend ranks absent from
//! the table resolve to the nearest known rank that does not exceed them;
//! those floor results are memoized because enablement checks hit this path
//! on every call.

use crate::backend::BackendLevel;
use crate::facade::Severity;
use dashmap::DashMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

/// Facade level used when the input is absent or unmapped.
pub const DEFAULT_FACADE_LEVEL: Severity = Severity::Debug;

/// Backend level used when the input is absent or unmapped.
pub const DEFAULT_BACKEND_LEVEL: BackendLevel = BackendLevel::DEBUG;

pub struct LevelTranslator {
    facade_to_backend: HashMap<Severity, BackendLevel>,
    backend_to_facade: BTreeMap<i32, Severity>,
    floor_cache: DashMap<i32, Severity>,
}

impl LevelTranslator {
    /// The process-wide translator.
    pub fn global() -> &'static LevelTranslator {
        static TRANSLATOR: OnceLock<LevelTranslator> = OnceLock::new();
        TRANSLATOR.get_or_init(LevelTranslator::new)
    }

    pub fn new() -> Self {
        let pairs = [
            (Severity::All, BackendLevel::ALL),
            (Severity::Trace, BackendLevel::TRACE),
            (Severity::Debug, BackendLevel::DEBUG),
            (Severity::Info, BackendLevel::INFO),
            (Severity::Warn, BackendLevel::WARN),
            (Severity::Error, BackendLevel::ERROR),
            (Severity::Fatal, BackendLevel::FATAL),
            (Severity::Off, BackendLevel::OFF),
        ];

        let mut facade_to_backend = HashMap::new();
        let mut backend_to_facade = BTreeMap::new();
        for (severity, level) in pairs {
            facade_to_backend.insert(severity, level);
            backend_to_facade.insert(level.value(), severity);
        }

        // backend-only levels: exact facade counterparts without a reverse
        // mapping from the facade side
        backend_to_facade.insert(BackendLevel::FINEST.value(), Severity::Trace);
        backend_to_facade.insert(BackendLevel::CONFIG.value(), Severity::Debug);

        Self {
            facade_to_backend,
            backend_to_facade,
            floor_cache: DashMap::new(),
        }
    }

    /// Translate a facade severity to the backend scale.
    ///
    /// Total: `None` (and any unmapped input) yields
    /// [`DEFAULT_BACKEND_LEVEL`].
    pub fn to_backend(&self, severity: Option<Severity>) -> BackendLevel {
        severity
            .and_then(|s| self.facade_to_backend.get(&s).copied())
            .unwrap_or(DEFAULT_BACKEND_LEVEL)
    }

    /// Translate a backend level to the facade scale.
    ///
    /// Total: `None` yields [`DEFAULT_FACADE_LEVEL`]; levels outside the
    /// table resolve through [`LevelTranslator::facade_for_rank`].
    pub fn to_facade(&self, level: Option<BackendLevel>) -> Severity {
        match level {
            Some(level) => self.facade_for_rank(level.value()),
            None => DEFAULT_FACADE_LEVEL,
        }
    }

    /// Resolve a raw backend rank: exact table match, else the facade level
    /// of the largest known rank not exceeding it, else `Severity::All` for
    /// ranks below the whole table.
    ///
    /// Floor results are cached with an idempotent insert; concurrent callers
    /// may race but always compute the same value.
    pub fn facade_for_rank(&self, rank: i32) -> Severity {
        if let Some(severity) = self.backend_to_facade.get(&rank) {
            return *severity;
        }
        if let Some(cached) = self.floor_cache.get(&rank) {
            return *cached;
        }
        let computed = self
            .backend_to_facade
            .range(..=rank)
            .next_back()
            .map(|(_, severity)| *severity)
            .unwrap_or(Severity::All);
        *self.floor_cache.entry(rank).or_insert(computed)
    }
}

impl Default for LevelTranslator {
    fn default() -> Self {
        Self::new()
    }
}
