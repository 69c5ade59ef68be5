//! DynamoDB table store implementation.
//!
//! Implements `catalog_core::storage::TableStore` using DynamoDB.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;

use catalog_core::storage::{
    render_key_condition, render_update, IndexQuery, Item, Key, Result, TableStore, UpdateCommand,
};

use crate::config::Config;

use super::conversions::{
    attributes_to_item, expression_values, item_to_attributes, key_to_attributes,
};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_scan_error, map_update_item_error,
};

type Attributes = HashMap<String, AttributeValue>;

/// DynamoDB-based table store.
///
/// One client serves every table; the table is named per call.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a store from the resolver configuration.
    ///
    /// Uses the AWS SDK default credential chain. `REGION` and
    /// `AWS_ENDPOINT_URL` override the SDK defaults when set.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.aws_region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        tracing::info!(
            region = ?sdk_config.region(),
            endpoint = config.endpoint_url.as_deref().unwrap_or("default"),
            "DynamoDB client configured"
        );

        Ok(Self::new(Client::new(&sdk_config)))
    }

    fn decode_all(items: Option<Vec<Attributes>>) -> Result<Vec<Item>> {
        items
            .unwrap_or_default()
            .into_iter()
            .map(attributes_to_item)
            .collect()
    }
}

#[async_trait]
impl TableStore for DynamoDbStore {
    async fn get_item(&self, table: &str, key: &Key) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(table)
            .set_key(Some(key_to_attributes(key)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, table))?;

        result.item.map(attributes_to_item).transpose()
    }

    async fn put_item(&self, table: &str, _key: &Key, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(item_to_attributes(item)))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table))?;

        Ok(())
    }

    async fn update_item(&self, table: &str, command: &UpdateCommand) -> Result<Option<Item>> {
        let Some(rendered) = render_update(command) else {
            return self.get_item(table, &command.key).await;
        };

        let values = if rendered.attribute_values.is_empty() {
            None
        } else {
            Some(expression_values(rendered.attribute_values))
        };

        let result = self
            .client
            .update_item()
            .table_name(table)
            .set_key(Some(key_to_attributes(&command.key)))
            .update_expression(rendered.expression)
            .set_expression_attribute_names(Some(rendered.attribute_names.into_iter().collect()))
            .set_expression_attribute_values(values)
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, table))?;

        result.attributes.map(attributes_to_item).transpose()
    }

    async fn delete_item(&self, table: &str, key: &Key) -> Result<()> {
        self.client
            .delete_item()
            .table_name(table)
            .set_key(Some(key_to_attributes(key)))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table))?;

        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key: Option<Attributes> = None;

        loop {
            let page = self
                .client
                .scan()
                .table_name(table)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| map_scan_error(e, table))?;

            items.extend(Self::decode_all(page.items)?);

            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn query_index(&self, table: &str, query: &IndexQuery) -> Result<Vec<Item>> {
        let condition = render_key_condition(query);
        let names: HashMap<String, String> = condition.attribute_names.into_iter().collect();
        let values = expression_values(condition.attribute_values);

        let mut items = Vec::new();
        let mut start_key: Option<Attributes> = None;

        loop {
            let page = self
                .client
                .query()
                .table_name(table)
                .index_name(&query.index_name)
                .key_condition_expression(&condition.expression)
                .set_expression_attribute_names(Some(names.clone()))
                .set_expression_attribute_values(Some(values.clone()))
                .scan_index_forward(true)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| map_query_error(e, table))?;

            items.extend(Self::decode_all(page.items)?);

            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }
}
