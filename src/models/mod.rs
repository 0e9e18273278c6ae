//! Data models for the E-Library client

pub mod book;
pub mod envelope;
mod hal;
pub mod history;
pub mod message;
pub mod page;
pub mod review;
pub mod role;

use serde::de::DeserializeOwned;

// Re-export commonly used types
pub use book::Book;
pub use history::History;
pub use message::Message;
pub use page::{FetchResult, Page};
pub use review::Review;
pub use role::RoleClaim;

/// A server-side record listed by a paginated endpoint.
///
/// Identity is assigned by the server and never changed by the client.
pub trait Resource: DeserializeOwned + Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Key under `_embedded` that holds this resource's records
    const COLLECTION: &'static str;

    fn id(&self) -> i64;
}
