//! Generic CRUD over one table.

use std::marker::PhantomData;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use catalog_core::catalog::{
    assign_identity, build_update_command, from_item, primary_key, to_item, Entity,
};
use catalog_core::storage::{Item, RepositoryError, TableStore, UpdateSemantics};

use crate::error::Result;

/// Table operations for entity type `E`.
///
/// Holds the table name and a shared handle to the store; no other state.
pub struct TableOps<E: Entity> {
    table: String,
    store: Arc<dyn TableStore>,
    semantics: UpdateSemantics,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for TableOps<E> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            store: Arc::clone(&self.store),
            semantics: self.semantics,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> TableOps<E> {
    pub fn new(
        table: impl Into<String>,
        store: Arc<dyn TableStore>,
        semantics: UpdateSemantics,
    ) -> Self {
        Self {
            table: table.into(),
            store,
            semantics,
            _entity: PhantomData,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub(crate) fn store(&self) -> &dyn TableStore {
        self.store.as_ref()
    }

    /// Fetches the record named by the primary key of `record`.
    ///
    /// Every other field of `record` is ignored.
    pub async fn get(&self, record: &E) -> Result<Option<E>> {
        let key = primary_key(record)?;
        let found = self
            .store
            .get_item(&self.table, &key)
            .await
            .and_then(|item| item.map(from_item).transpose());
        self.logged("get", found)
    }

    /// Stores `record` under a freshly generated key and returns the stored
    /// form.
    ///
    /// A caller-supplied key is discarded. The write is an unconditional
    /// full replace.
    pub async fn create(&self, record: E) -> Result<E> {
        let record = assign_identity(record, Uuid::new_v4(), Utc::now());
        let key = primary_key(&record)?;
        let item = self.logged("create", to_item(&record))?;

        let stored = self.store.put_item(&self.table, &key, item.clone()).await;
        self.logged("create", stored)?;

        tracing::debug!(table = %self.table, key = %key, "Created record");
        self.logged("create", from_item(item))
    }

    /// Writes the updatable fields of `record` and returns the stored result.
    ///
    /// Fails before touching storage when the key is missing. A missing
    /// record is created. With nothing to write the current record is
    /// returned unchanged.
    pub async fn update(&self, mut record: E) -> Result<Option<E>> {
        let key = primary_key(&record)?;
        record.on_update(Utc::now());

        let attributes = self.logged("update", to_item(&record))?;
        let command = build_update_command::<E>(key, &attributes, self.semantics);
        if command.is_empty() {
            tracing::debug!(table = %self.table, key = %command.key, "Empty update, reading instead");
            return self.get(&record).await;
        }

        let updated = self
            .store
            .update_item(&self.table, &command)
            .await
            .and_then(|item| item.map(from_item).transpose());
        self.logged("update", updated)
    }

    /// Deletes the record named by the primary key of `record`.
    ///
    /// Succeeds whether or not the record existed.
    pub async fn delete(&self, record: &E) -> Result<bool> {
        let key = primary_key(record)?;
        let deleted = self.store.delete_item(&self.table, &key).await;
        self.logged("delete", deleted)?;
        Ok(true)
    }

    /// Every record in the table.
    pub async fn list(&self) -> Result<Vec<E>> {
        let items = self.store.scan(&self.table).await.and_then(decode_all);
        self.logged("list", items)
    }

    /// Logs a storage failure with its table and operation, then passes it on.
    pub(crate) fn logged<T>(
        &self,
        operation: &'static str,
        result: std::result::Result<T, RepositoryError>,
    ) -> Result<T> {
        result.map_err(|error| {
            tracing::error!(
                table = %self.table,
                entity = E::ENTITY_TYPE,
                operation,
                error = %error,
                "Storage operation failed"
            );
            error.into()
        })
    }
}

pub(crate) fn decode_all<E: Entity>(
    items: Vec<Item>,
) -> std::result::Result<Vec<E>, RepositoryError> {
    items.into_iter().map(from_item).collect()
}
