//! Mode routing
//!
//! - serve: HTTP server (default)
//! - repair: one-shot route index repair
//! - config: sample configuration output

pub mod maintenance;
pub mod server;

pub use maintenance::{run_generate_config, run_repair};
pub use server::run_server;
