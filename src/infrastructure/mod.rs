//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: in-memory and SQLite adapters for characters and items
//! - HTTP: REST API routes
//! - Config: Application configuration
//! - State: Shared application state

pub mod config;
pub mod http;
pub mod persistence;
pub mod state;
