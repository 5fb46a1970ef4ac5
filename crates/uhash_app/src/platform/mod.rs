//! Console platform layer: settings, logging, the controller event loop and
//! the collaborators standing in for native UI pieces.
mod app;
mod effects;
pub mod logging;
pub mod settings;
mod ui;

pub use app::run_app;

use uhash_logging::uhash_error;

/// Terminates the process after an invariant violation.
pub(crate) fn fatal(reason: &str) -> ! {
    uhash_error!("Fatal: {}", reason);
    eprintln!("uhash: fatal error: {reason}");
    log::logger().flush();
    std::process::abort()
}
