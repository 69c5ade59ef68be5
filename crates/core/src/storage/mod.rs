mod error;
mod expression;
mod http_mapping;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use expression::{render_key_condition, render_update, RenderedExpression};
pub use http_mapping::{repository_error_to_status_code, validation_error_to_status_code};
pub use traits::TableStore;
pub use types::{IndexQuery, Item, Key, UpdateAction, UpdateCommand, UpdateSemantics};
