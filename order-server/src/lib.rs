//! Order Management Server
//!
//! # Architecture Overview
//!
//! HTTP API for order lifecycle management. Orders are persisted in an
//! embedded key-value record store, mirrored as JSON documents in blob
//! storage, and every state change is broadcast on a notification bus.
//!
//! The core is the [`OrderProcessor`]: it sequences each lifecycle
//! operation across the three adapters (record store, document store,
//! notification publisher) with defined partial-failure behavior. The
//! adapters are narrow capability traits, so the backing technology can
//! be swapped without touching the orchestration.
//!
//! # Module Structure
//!
//! ```text
//! order-server/src/
//! ├── core/          # Configuration, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # Validation, money normalization, lifecycle orchestration
//! ├── storage/       # Record store (redb) and document store (filesystem)
//! ├── notify/        # Notification bus and feed
//! └── utils/         # Errors, logging
//! ```

pub mod api;
pub mod core;
pub mod notify;
pub mod orders;
pub mod storage;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use crate::orders::{OrderProcessor, ProcessorError};
pub use crate::utils::{AppError, AppResult};

// Re-export logger functions
pub use crate::utils::logger::init_logger;
