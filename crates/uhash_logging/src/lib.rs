#![deny(missing_docs)]
//! Shared logging utilities for the uhash workspace.
//!
//! This crate provides the `uhash_*` logging macros used across the codebase,
//! a per-thread job tag that those macros prefix to every line, and a minimal
//! test initializer for the global logger.

use std::cell::Cell;
use std::fmt;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Id of the hashing job running on the current thread, if any.
    static JOB_TAG: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Tags every subsequent log line of the current thread with `job_id`.
/// Worker threads call this once before they start hashing.
pub fn set_job_tag(job_id: u64) {
    JOB_TAG.with(|v| v.set(Some(job_id)));
}

/// Removes the job tag of the current thread.
pub fn clear_job_tag() {
    JOB_TAG.with(|v| v.set(None));
}

/// Returns the job tag of the current thread, `None` on untagged threads.
pub fn job_tag() -> Option<u64> {
    JOB_TAG.with(|v| v.get())
}

/// Display helper rendering the current job tag as a `[job N] ` prefix.
#[doc(hidden)]
pub struct JobTagPrefix(Option<u64>);

impl fmt::Display for JobTagPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(job_id) => write!(f, "[job {job_id}] "),
            None => Ok(()),
        }
    }
}

#[doc(hidden)]
pub fn job_tag_prefix() -> JobTagPrefix {
    JobTagPrefix(job_tag())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! uhash_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("{}{}", $crate::job_tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! uhash_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("{}{}", $crate::job_tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! uhash_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("{}{}", $crate::job_tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! uhash_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("{}{}", $crate::job_tag_prefix(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! uhash_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("{}{}", $crate::job_tag_prefix(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
