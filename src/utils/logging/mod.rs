//! Logging utilities for operations and progress tracking
//!
//! This module provides uniform log lines for long-running operations, a
//! helper for reporting clamped values, and progress bars for batch runs.

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{log_clamp, log_operation_complete, log_operation_start, log_warning};
pub use progress::{create_main_progress_bar, create_spinner, finish_progress_bar};
