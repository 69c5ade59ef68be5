//! Table operations engine.
//!
//! [`TableOps`] is generic over the stored entity; taxonomy tables add the
//! parent-index lookup.

mod ops;
mod taxonomy;

pub use ops::TableOps;
