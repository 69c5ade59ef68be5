//! Routes an operation to the table engine bound to it.

use std::sync::Arc;

use serde_json::Value;

use catalog_core::catalog::{to_item, Entity, Product, SecondaryIndex, Taxonomy, ValidationError};
use catalog_core::resolver::{Operation, Resolved};
use catalog_core::storage::{Item, TableStore};

use crate::config::Config;
use crate::error::Result;
use crate::table::TableOps;

/// The dispatch table: one engine per entity plus the taxonomy parent index.
#[derive(Clone)]
pub struct Dispatcher {
    products: TableOps<Product>,
    taxonomies: TableOps<Taxonomy>,
    parent_index: SecondaryIndex,
}

impl Dispatcher {
    pub fn new(config: &Config, store: Arc<dyn TableStore>) -> Self {
        Self {
            products: TableOps::new(
                &config.product_table_name,
                Arc::clone(&store),
                config.update_semantics,
            ),
            taxonomies: TableOps::new(
                &config.taxonomy_table_name,
                store,
                config.update_semantics,
            ),
            parent_index: Taxonomy::parent_index(&config.taxonomy_parent_index),
        }
    }

    /// Decodes `arguments` for `operation` and runs it.
    pub async fn dispatch(&self, operation: Operation, arguments: Item) -> Result<Resolved> {
        tracing::debug!(operation = %operation, "Dispatching");

        match operation {
            Operation::GetProduct => {
                let found = self.products.get(&decode(arguments)?).await?;
                optional(found)
            }
            Operation::CreateProduct => {
                let created = self.products.create(decode(arguments)?).await?;
                single(&created)
            }
            Operation::UpdateProduct => {
                let updated = self.products.update(decode(arguments)?).await?;
                optional(updated)
            }
            Operation::DeleteProduct => {
                let deleted = self.products.delete(&decode::<Product>(arguments)?).await?;
                Ok(Resolved::Deleted(deleted))
            }
            Operation::ListProducts => many(self.products.list().await?),
            Operation::GetTaxonomy => {
                let found = self.taxonomies.get(&decode(arguments)?).await?;
                optional(found)
            }
            Operation::CreateTaxonomy => {
                let created = self.taxonomies.create(decode(arguments)?).await?;
                single(&created)
            }
            Operation::UpdateTaxonomy => {
                let updated = self.taxonomies.update(decode(arguments)?).await?;
                optional(updated)
            }
            Operation::DeleteTaxonomy => {
                let deleted = self
                    .taxonomies
                    .delete(&decode::<Taxonomy>(arguments)?)
                    .await?;
                Ok(Resolved::Deleted(deleted))
            }
            Operation::ListTaxonomies => many(self.taxonomies.list().await?),
            Operation::GetTaxonomiesByParent => {
                let children = self
                    .taxonomies
                    .query_by_parent(&self.parent_index, &decode(arguments)?)
                    .await?;
                many(children)
            }
        }
    }
}

/// Decodes an argument record into `E`.
fn decode<E: Entity>(arguments: Item) -> std::result::Result<E, ValidationError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ValidationError::MalformedArguments(format!("{}: {e}", E::ENTITY_TYPE)))
}

fn encode<E: Entity>(record: &E) -> Result<Value> {
    Ok(Value::Object(to_item(record)?))
}

fn single<E: Entity>(record: &E) -> Result<Resolved> {
    encode(record).map(Resolved::Record)
}

fn optional<E: Entity>(record: Option<E>) -> Result<Resolved> {
    match record {
        Some(record) => single(&record),
        None => Ok(Resolved::Null),
    }
}

fn many<E: Entity>(records: Vec<E>) -> Result<Resolved> {
    records
        .iter()
        .map(encode)
        .collect::<Result<Vec<_>>>()
        .map(Resolved::Records)
}
