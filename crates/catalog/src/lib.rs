//! Catalog resolver: GraphQL field resolution for products and taxonomies.
//!
//! [`Resolver`] turns one invocation event into one JSON response using a
//! [`TableStore`](catalog_core::storage::TableStore) chosen at startup.

pub mod adapter;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod storage;
pub mod table;

pub use adapter::Resolver;
pub use config::{Config, FailurePolicy};
pub use error::OperationError;
