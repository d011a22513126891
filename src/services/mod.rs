// Service exports
pub mod cache;
pub mod postgres;
pub mod store;

pub use cache::{CacheError, CacheStats, ProfileCache};
pub use postgres::{MatchStoreError, PostgresClient};
pub use store::{ProfileStoreClient, ProfileUpdate, StoreError};
