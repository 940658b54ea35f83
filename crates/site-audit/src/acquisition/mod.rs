//! Acquisition: HTTP retrieval of the fixed set of audit resources.

pub mod bundle;
pub mod fetcher;
pub mod http_client;

pub use bundle::{FetchBundle, FetchedResource, ResourceKind, STATUS_HEADER};
pub use fetcher::{Fetcher, ResourceSource, StaticSource};
