// Application state module
// Manages runtime state and configuration cache

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::handler::join::JoinCommand;

/// Application state shared by all connections
pub struct AppState {
    pub config: Config,
    /// Resolved join command (argv built once at startup)
    pub join_command: JoinCommand,
    /// Shutdown signal for the accept loop
    pub shutdown: Arc<Notify>,

    // Cached config values for fast access without locks
    pub cached_access_log: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            join_command: JoinCommand::from_config(&config.join),
            shutdown: Arc::new(Notify::new()),
            cached_access_log: Arc::new(AtomicBool::new(config.logging.access_log)),
        }
    }
}
