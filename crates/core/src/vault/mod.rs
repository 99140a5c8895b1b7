//! Per-owner attachment vault.
//!
//! This module provides blob storage scoped to an owner's partition:
//! - Size-gated upload under randomly generated keys
//! - Signed, time-bounded download URLs
//! - Idempotent deletion
//!
//! Keys are `{owner}/{random}` - the owner prefix IS the partition, and
//! every retrieval checks it.

mod error;
mod service;

pub use error::VaultError;
pub use service::{SignedUrl, Vault};

pub use resourcehub_shared::config::{StorageProvider, VaultConfig};
