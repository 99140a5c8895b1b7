//! Feed assembly.
//!
//! Combines the post repository, the vault, and the link classifier into
//! presentation-ready views, for two modes: personal (owner-scoped) and
//! global (all posts, viewer-scoped attachment resolution).

mod error;
mod service;
mod types;

pub use error::FeedError;
pub use service::{FeedService, MAX_CONCURRENT_RESOLUTIONS};
pub use types::PostView;
