//! In-memory storage backend.
//!
//! Tables are `HashMap`s of items keyed by primary-key value, wrapped in
//! `Arc<RwLock<_>>`. Used by the test suites and by builds without the
//! `dynamodb` feature.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog::storage::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Hand `Arc::new(store)` to the resolver...
//! ```

mod repository;

pub use repository::InMemoryStore;
