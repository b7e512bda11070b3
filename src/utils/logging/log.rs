//! Logging utilities
//!
//! This module provides standardized logging functions for operations.

use std::time::Duration;

/// Log an operation start with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `subject` - What the operation works on (a disease, a file, a location)
pub fn log_operation_start(operation: &str, subject: &str) {
    log::info!("{operation} {subject}");
}

/// Log an operation completion with consistent format
///
/// # Arguments
/// * `operation` - Description of the operation, in past tense
/// * `subject` - What the operation worked on
/// * `items` - Number of items produced or processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, subject: &str, items: usize, elapsed: Option<Duration>) {
    if let Some(duration) = elapsed {
        log::info!("Successfully {operation} {items} items for {subject} in {duration:?}");
    } else {
        log::info!("Successfully {operation} {items} items for {subject}");
    }
}

/// Log an operation warning with consistent format
///
/// # Arguments
/// * `message` - Warning message
/// * `subject` - Optional subject related to the warning
pub fn log_warning(message: &str, subject: Option<&str>) {
    if let Some(subject) = subject {
        log::warn!("{message}: {subject}");
    } else {
        log::warn!("{message}");
    }
}

/// Report that a value was forced into its valid range
///
/// # Arguments
/// * `parameter` - Name of the clamped parameter
/// * `original` - Value before clamping
/// * `clamped` - Value actually used
pub fn log_clamp(parameter: &str, original: f64, clamped: f64) {
    log::warn!("Clamped {parameter} from {original} to {clamped}");
}
