//! In-memory table store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::storage::{IndexQuery, Item, Key, Result, TableStore, UpdateCommand};

type Table = HashMap<String, Item>;

/// In-memory storage backend.
///
/// Each table maps a primary-key value to its item. Tables spring into
/// existence on first write. Data is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items currently held in `table`.
    pub async fn item_count(&self, table: &str) -> usize {
        let tables = self.tables.read().await;
        tables.get(table).map_or(0, HashMap::len)
    }
}

#[async_trait]
impl TableStore for InMemoryStore {
    async fn get_item(&self, table: &str, key: &Key) -> Result<Option<Item>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .and_then(|items| items.get(&key.value))
            .cloned())
    }

    async fn put_item(&self, table: &str, key: &Key, item: Item) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .entry(table.to_string())
            .or_default()
            .insert(key.value.clone(), item);
        Ok(())
    }

    async fn update_item(&self, table: &str, command: &UpdateCommand) -> Result<Option<Item>> {
        let mut tables = self.tables.write().await;
        let item = tables
            .entry(table.to_string())
            .or_default()
            .entry(command.key.value.clone())
            .or_default();
        command.apply(item);
        Ok(Some(item.clone()))
    }

    async fn delete_item(&self, table: &str, key: &Key) -> Result<()> {
        let mut tables = self.tables.write().await;
        if let Some(items) = tables.get_mut(table) {
            items.remove(&key.value);
        }
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>> {
        let tables = self.tables.read().await;
        Ok(tables
            .get(table)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn query_index(&self, table: &str, query: &IndexQuery) -> Result<Vec<Item>> {
        let tables = self.tables.read().await;
        let mut matches: Vec<Item> = tables
            .get(table)
            .map(|items| {
                items
                    .values()
                    .filter(|item| query.matches(item))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        query.sort(&mut matches);
        Ok(matches)
    }
}
