mod entity;
mod error;
mod operations;
mod types;

pub use entity::{Entity, SecondaryIndex};
pub use error::ValidationError;
pub use operations::{
    assign_identity, build_update_command, from_item, parent_query, primary_key, to_item,
};
pub use types::{Product, Taxonomy};
