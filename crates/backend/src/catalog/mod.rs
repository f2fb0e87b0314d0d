pub mod error;
pub mod hierarchy;
pub mod persistence;
pub mod reorder;
pub mod seed;
pub mod service;
pub mod store;

pub use error::{CatalogError, CatalogResult};
pub use persistence::{CatalogRecord, CatalogRepository, MemoryCatalogRepository, StoreChange};
pub use service::{CatalogService, DeletePolicy};
pub use store::{EntityStore, Stored};
