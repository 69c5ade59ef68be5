//! Storage backend implementations.
//!
//! This module provides concrete implementations of
//! `catalog_core::storage::TableStore`. The in-memory backend is always
//! compiled; the DynamoDB backend is selected with a feature flag.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! # Examples
//!
//! Build with DynamoDB (default):
//! ```bash
//! cargo build -p catalog
//! ```
//!
//! Build against the in-memory store only:
//! ```bash
//! cargo build -p catalog --no-default-features
//! ```

use std::sync::Arc;

use catalog_core::storage::{RepositoryError, TableStore};

use crate::config::Config;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;
pub use inmemory::InMemoryStore;

/// Builds the store of the compiled-in backend.
#[cfg(feature = "dynamodb")]
pub async fn connect(config: &Config) -> Result<Arc<dyn TableStore>, RepositoryError> {
    Ok(Arc::new(DynamoDbStore::connect(config).await?))
}

/// Builds the store of the compiled-in backend.
#[cfg(not(feature = "dynamodb"))]
pub async fn connect(_config: &Config) -> Result<Arc<dyn TableStore>, RepositoryError> {
    tracing::warn!("DynamoDB backend not compiled in, using the in-memory store");
    Ok(Arc::new(InMemoryStore::new()))
}
