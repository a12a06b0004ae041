//! HTTP protocol layer module
//!
//! Response builders shared by the router, decoupled from command execution.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_500_response,
    build_options_response, build_token_response,
};
