//! Bookstore Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod catalog_store;
pub mod config;
pub mod logging;
pub mod server;
pub mod service;

// Re-export commonly used types for convenience
pub use catalog_store::{Book, BookStore, CatalogError, NewBook, YearRange};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
pub use service::CatalogService;
