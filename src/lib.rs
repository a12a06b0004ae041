//! joinserve - cluster join-token HTTP service
//!
//! Exposes a single HTTP endpoint that invokes a cluster-management command
//! to issue a time-limited join token and relays the command's output to the
//! caller verbatim.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
