//! Functional core of the catalog resolver.
//!
//! Entity schemas, the storage contract, update-expression rendering and the
//! resolver wire types. Nothing in this crate performs I/O.

pub mod catalog;
pub mod resolver;
pub mod serde;
pub mod storage;
