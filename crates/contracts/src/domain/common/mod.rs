//! Common types and traits for all catalog aggregates

pub mod aggregate_root;
pub mod entity_id;
pub mod entity_kind;
pub mod entity_metadata;
pub mod nullable;
pub mod status;
pub mod validation;

// Re-exports
pub use aggregate_root::AggregateRoot;
pub use entity_id::EntityId;
pub use entity_kind::EntityKind;
pub use entity_metadata::EntityMetadata;
