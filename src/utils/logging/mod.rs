//! Logging utilities for output
//!
//! This module provides utilities for logging and console output.

pub mod console;
pub mod log;

// Re-export commonly used functions for convenience
pub use self::console::{print_summary_table, summary_report};
pub use self::log::{log_operation_complete, log_operation_start, log_warning};
