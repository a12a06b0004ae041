// Server module entry point
// Accept loop with graceful shutdown

pub mod connection;
pub mod listener;
pub mod signal;

pub use listener::create_listener;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;
use connection::accept_connection;

/// Run the accept loop until the state's shutdown signal fires.
///
/// After the signal, waits up to `performance.shutdown_grace` seconds for
/// active connections to finish before returning.
pub async fn run(listener: TcpListener, state: Arc<AppState>) {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = Arc::clone(&state.shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                break;
            }
        }
    }

    // Stop accepting, then drain in-flight connections
    drop(listener);
    drain_connections(&active_connections, state.config.performance.shutdown_grace).await;
}

/// Wait for active connections to finish, up to `grace_secs` seconds.
async fn drain_connections(active_connections: &Arc<AtomicUsize>, grace_secs: u64) {
    let deadline =
        tokio::time::Instant::now() + std::time::Duration::from_secs(grace_secs);

    loop {
        let active = active_connections.load(Ordering::SeqCst);
        if active == 0 {
            logger::log_shutdown("All connections closed");
            return;
        }
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {active} connections still active"
            ));
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
