//! Join command execution module
//!
//! Spawns the cluster-management command that issues a time-limited join
//! token and relays its standard output to the caller. The output format is
//! owned entirely by the external tool; nothing here parses or rewrites it.

use std::process::Output;
use std::sync::Arc;
use std::time::Instant;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::process::Command;

use crate::config::{AppState, JoinConfig};
use crate::http;
use crate::logger;

/// Resolved join command with the TTL flag already appended
#[derive(Debug, Clone)]
pub struct JoinCommand {
    program: String,
    args: Vec<String>,
}

impl JoinCommand {
    /// Build the command from configuration
    ///
    /// The final argv is `program args... --token-ttl <token_ttl>`.
    pub fn from_config(cfg: &JoinConfig) -> Self {
        let mut args = cfg.args.clone();
        args.push("--token-ttl".to_string());
        args.push(cfg.token_ttl.to_string());

        Self {
            program: cfg.program.clone(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Run the command to completion, capturing stdout and stderr
    ///
    /// No timeout is applied; the request waits as long as the cluster tool
    /// takes to issue the token.
    pub async fn output(&self) -> std::io::Result<Output> {
        Command::new(&self.program).args(&self.args).output().await
    }
}

/// Handle a request to the join endpoint
///
/// Success relays the captured stdout byte-for-byte with status 200.
/// Spawn failures and non-zero exits are logged and answered with 500;
/// failure output is never passed to the caller.
pub async fn serve_join(state: &Arc<AppState>, is_head: bool) -> Response<Full<Bytes>> {
    let start = Instant::now();

    match state.join_command.output().await {
        Ok(out) if out.status.success() => {
            logger::log_join_issued(out.stdout.len(), start.elapsed().as_millis());
            http::build_token_response(out.stdout, &state.config.http, is_head)
        }
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            logger::log_error(&format!(
                "Join command '{}' exited with {}: {}",
                state.join_command.program(),
                out.status,
                stderr.trim()
            ));
            http::build_500_response()
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to spawn join command '{}': {e}",
                state.join_command.program()
            ));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join_config(program: &str, args: &[&str], ttl: u64) -> JoinConfig {
        JoinConfig {
            path: "/join".to_string(),
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
            token_ttl: ttl,
        }
    }

    #[test]
    fn test_argv_appends_ttl_flag() {
        let cmd = JoinCommand::from_config(&join_config("microk8s", &["add-node"], 300));
        assert_eq!(cmd.program(), "microk8s");
        assert_eq!(cmd.args(), ["add-node", "--token-ttl", "300"]);
    }

    #[test]
    fn test_argv_custom_ttl() {
        let cmd = JoinCommand::from_config(&join_config("microk8s", &["add-node"], 60));
        assert_eq!(cmd.args().last().unwrap(), "60");
    }

    #[tokio::test]
    async fn test_output_captures_stdout_exactly() {
        // echo prints its arguments followed by a newline
        let cmd = JoinCommand::from_config(&join_config("echo", &["add-node"], 300));
        let out = cmd.output().await.expect("echo should spawn");
        assert!(out.status.success());
        assert_eq!(out.stdout, b"add-node --token-ttl 300\n");
    }

    #[tokio::test]
    async fn test_output_nonzero_exit() {
        let cmd = JoinCommand::from_config(&join_config("false", &[], 300));
        let out = cmd.output().await.expect("false should spawn");
        assert!(!out.status.success());
    }

    #[tokio::test]
    async fn test_output_missing_binary() {
        let cmd = JoinCommand::from_config(&join_config("no-such-binary-joinserve", &[], 300));
        assert!(cmd.output().await.is_err());
    }
}
