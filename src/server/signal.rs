// Signal handling module
//
// SIGTERM and SIGINT (Ctrl+C) both trigger graceful shutdown: the accept
// loop stops and in-flight connections get a grace period to finish.

use std::sync::Arc;
use tokio::sync::Notify;

/// Start the signal handler task (Unix)
///
/// Notifies `shutdown` when SIGTERM or SIGINT is received.
#[cfg(unix)]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGTERM handler: {e}"));
                return;
            }
        };
        let mut sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => s,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to register SIGINT handler: {e}"));
                return;
            }
        };

        tokio::select! {
            _ = sigterm.recv() => {
                crate::logger::log_shutdown("SIGTERM received, shutting down");
            }
            _ = sigint.recv() => {
                crate::logger::log_shutdown("SIGINT received (Ctrl+C), shutting down");
            }
        }

        // notify_one stores a permit, so a signal arriving before the accept
        // loop reaches its first wait is not lost
        shutdown.notify_one();
    });
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub fn start_signal_handler(shutdown: Arc<Notify>) {
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            crate::logger::log_shutdown("Ctrl+C received, shutting down");
            shutdown.notify_one();
        }
    });
}
