//! Handler implementations

#[cfg(feature = "console")]
pub mod console;
pub mod memory;

#[cfg(feature = "console")]
pub use console::{ConsoleFormat, ConsoleHandler};
pub use memory::MemoryHandler;
