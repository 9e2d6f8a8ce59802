//! Utilities module for logging and helper functions

pub mod logging;

// Re-export main types for convenience
pub use logging::{init_logging, LogConfig};
