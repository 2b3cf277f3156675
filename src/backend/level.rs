//! Backend level definitions
//!
//! Backend levels are (name, integer rank) pairs on their own scale. The rank
//! grows with severity and is unrelated to the facade's ordering, so the two
//! sides must never be converted numerically; `bridge::translator` owns the
//! mapping tables.

use crate::error::BridgeError;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A named severity level on the backend scale.
///
/// Levels compare by rank; the name is display metadata. Custom levels can be
/// created with [`BackendLevel::new`] and resolve through the translator's
/// floor policy when they are not part of the canonical table.
#[derive(Debug, Clone, Copy)]
pub struct BackendLevel {
    name: &'static str,
    value: i32,
}

impl BackendLevel {
    pub const ALL: BackendLevel = BackendLevel::new("ALL", i32::MIN);
    pub const FINEST: BackendLevel = BackendLevel::new("FINEST", 300);
    pub const TRACE: BackendLevel = BackendLevel::new("TRACE", 400);
    pub const DEBUG: BackendLevel = BackendLevel::new("DEBUG", 500);
    pub const CONFIG: BackendLevel = BackendLevel::new("CONFIG", 700);
    pub const INFO: BackendLevel = BackendLevel::new("INFO", 800);
    pub const WARN: BackendLevel = BackendLevel::new("WARN", 900);
    pub const ERROR: BackendLevel = BackendLevel::new("ERROR", 1000);
    pub const FATAL: BackendLevel = BackendLevel::new("FATAL", 1100);
    pub const OFF: BackendLevel = BackendLevel::new("OFF", i32::MAX);

    /// Canonical levels in ascending rank order.
    pub const KNOWN: [BackendLevel; 10] = [
        BackendLevel::ALL,
        BackendLevel::FINEST,
        BackendLevel::TRACE,
        BackendLevel::DEBUG,
        BackendLevel::CONFIG,
        BackendLevel::INFO,
        BackendLevel::WARN,
        BackendLevel::ERROR,
        BackendLevel::FATAL,
        BackendLevel::OFF,
    ];

    pub const fn new(name: &'static str, value: i32) -> Self {
        Self { name, value }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn value(&self) -> i32 {
        self.value
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self.value {
            v if v <= Self::TRACE.value => BrightBlack,
            v if v <= Self::CONFIG.value => Blue,
            v if v <= Self::INFO.value => Green,
            v if v <= Self::WARN.value => Yellow,
            v if v <= Self::ERROR.value => Red,
            _ => BrightRed,
        }
    }
}

impl PartialEq for BackendLevel {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for BackendLevel {}

impl Hash for BackendLevel {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for BackendLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BackendLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for BackendLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl FromStr for BackendLevel {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        BackendLevel::KNOWN
            .iter()
            .find(|level| level.name == upper)
            .copied()
            .ok_or_else(|| BridgeError::UnknownLevel(s.to_string()))
    }
}

impl Serialize for BackendLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}
