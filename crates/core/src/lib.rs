//! Core types and shared functionality for mcp-searxng.
//!
//! This crate provides:
//! - In-memory TTL cache for converted page content
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, TtlCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
