//! Request extractors for authentication.

pub mod auth;

pub use auth::{AuthUser, MaybeAuthUser};
