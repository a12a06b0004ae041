//! Request handler module
//!
//! Responsible for request routing dispatch and join-token issuance.

pub mod join;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
