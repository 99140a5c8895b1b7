//! Post metadata lifecycle.
//!
//! This module provides business logic for resource posts including:
//! - Field validation
//! - Creation with generated ids
//! - Ownership-checked update and delete
//! - Owner-scoped and global listings

mod error;
mod service;
mod types;

pub use error::PostError;
pub use service::{PostRepository, PostService};
pub use types::{CreatePostRecord, Keyword, Post, PostFields};
