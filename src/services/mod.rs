// Service exports
pub mod memory;
pub mod postgres;
pub mod profiles;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use profiles::{ProfileError, ProfileService};
pub use store::{ProfileReader, ProfileStore, StoreError};
