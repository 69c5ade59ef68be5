use async_trait::async_trait;

use super::{IndexQuery, Item, Key, Result, UpdateCommand};

/// Narrow interface to a document key-value store.
///
/// Every call addresses a table by name. Writes are unconditional: puts fully
/// replace, updates create missing records, deletes succeed on missing keys.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Gets a record by its primary key.
    async fn get_item(&self, table: &str, key: &Key) -> Result<Option<Item>>;

    /// Writes a record, replacing any record stored under the same key.
    async fn put_item(&self, table: &str, key: &Key, item: Item) -> Result<()>;

    /// Applies a field-level update and returns the record as stored afterwards.
    async fn update_item(&self, table: &str, command: &UpdateCommand) -> Result<Option<Item>>;

    /// Deletes a record by its primary key.
    async fn delete_item(&self, table: &str, key: &Key) -> Result<()>;

    /// Returns every record in the table.
    async fn scan(&self, table: &str) -> Result<Vec<Item>>;

    /// Returns every record of one secondary index partition, in sort order.
    async fn query_index(&self, table: &str, query: &IndexQuery) -> Result<Vec<Item>>;
}
