//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB `AttributeValue` maps and
//! the JSON items of `catalog_core::storage`. These are testable in isolation
//! without DynamoDB access.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::types::AttributeValue;
use catalog_core::storage::{Item, Key, RepositoryError};
use serde_json::{Number, Value};

/// Convert a JSON item to a DynamoDB item.
pub fn item_to_attributes(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, value_to_attribute(value)))
        .collect()
}

/// Convert a DynamoDB item to a JSON item.
pub fn attributes_to_item(
    attributes: HashMap<String, AttributeValue>,
) -> Result<Item, RepositoryError> {
    attributes
        .into_iter()
        .map(|(name, value)| {
            let value = attribute_to_value(value)
                .map_err(|e| RepositoryError::InvalidData(format!("Attribute {name}: {e}")))?;
            Ok((name, value))
        })
        .collect()
}

/// Convert a primary key to its DynamoDB key map.
pub fn key_to_attributes(key: &Key) -> HashMap<String, AttributeValue> {
    HashMap::from([(key.attribute.clone(), AttributeValue::S(key.value.clone()))])
}

/// Convert placeholder values to `ExpressionAttributeValues`.
pub fn expression_values(values: BTreeMap<String, Value>) -> HashMap<String, AttributeValue> {
    values
        .into_iter()
        .map(|(placeholder, value)| (placeholder, value_to_attribute(value)))
        .collect()
}

pub fn value_to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => {
            AttributeValue::L(values.into_iter().map(value_to_attribute).collect())
        }
        Value::Object(map) => AttributeValue::M(item_to_attributes(map)),
    }
}

pub fn attribute_to_value(attribute: AttributeValue) -> Result<Value, String> {
    match attribute {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(b) => Ok(Value::Bool(b)),
        AttributeValue::N(n) => parse_number(&n),
        AttributeValue::S(s) => Ok(Value::String(s)),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.into_iter().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(n))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::L(values) => values
            .into_iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => map
            .into_iter()
            .map(|(name, value)| attribute_to_value(value).map(|v| (name, v)))
            .collect::<Result<Item, _>>()
            .map(Value::Object),
        AttributeValue::B(_) | AttributeValue::Bs(_) => {
            Err("binary attributes are not supported".to_string())
        }
        other => Err(format!("unsupported attribute type: {other:?}")),
    }
}

fn parse_number(n: &str) -> Result<Value, String> {
    serde_json::from_str::<Number>(n.trim())
        .map(Value::Number)
        .map_err(|_| format!("invalid number: {n}"))
}
