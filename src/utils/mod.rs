//! Shared helpers that are not part of any single component

pub mod logging;

pub use logging::{log_clamp, log_operation_complete, log_operation_start, log_warning};
