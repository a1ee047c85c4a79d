//! Shared configuration and error types for imgvault.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DeliveryConfig, ServerConfig, StorageConfig};
pub use error::{AppError, AppResult};
