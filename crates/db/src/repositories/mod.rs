//! Repository implementations for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. The traits they implement live in `resourcehub-core`.

pub mod post;

pub use post::PostRepository;
