//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of
//! `catalog_core::storage::TableStore` using `aws-sdk-dynamodb`.

mod conversions;
mod error;
mod repository;

pub use repository::DynamoDbStore;
