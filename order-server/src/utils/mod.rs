//! Utility module - errors and logging
//!
//! - [`AppError`] - application error type with HTTP mapping
//! - [`AppResponse`] - error/response envelope
//! - [`logger`] - tracing setup

pub mod error;
pub mod logger;
pub mod result;

// Re-exports
pub use error::{AppError, AppResponse};
pub use result::AppResult;
