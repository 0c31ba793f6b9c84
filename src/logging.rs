//! Diagnostic output for the CLI.

use tracing::Level;
use tracing_subscriber::fmt;

/// Installs a stderr subscriber. `0` leaves tracing disabled, `1` shows
/// debug events, `2` or more shows trace events.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .try_init();
}
