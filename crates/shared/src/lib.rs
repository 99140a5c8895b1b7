//! Shared types, errors, and configuration for Resource Hub.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types with HTTP mappings
//! - Configuration management
//! - Bearer-token claims and validation helpers

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;

pub use auth::Claims;
pub use config::{AppConfig, StorageProvider, VaultConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, JwtService};
