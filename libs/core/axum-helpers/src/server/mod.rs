//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI documentation and common middleware
//! - Graceful shutdown coordination with a cleanup window

pub mod app;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use shutdown::ShutdownCoordinator;
