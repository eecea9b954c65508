//! Kinship - profile directory with interest-based matching
//!
//! Profiles store their interests as a set of strings. The discovery query
//! returns every other profile in the same city sharing at least one
//! interest. Persistence sits behind the `ProfileStore` trait, with a
//! PostgreSQL and an in-memory implementation.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_matches, Interests, MatchError, MatchResult, Matcher};
pub use models::{Profile, ProfileId, ProfileRecord, CreateProfileRequest, UpdateProfileRequest};
pub use services::{MemoryStore, PostgresStore, ProfileReader, ProfileService, ProfileStore};
