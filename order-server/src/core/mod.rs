//! Core module - server configuration, state, and HTTP entry point
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - adapter singletons and the order processor
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
