use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::storage::{
    IndexQuery, Item, Key, RepositoryError, UpdateAction, UpdateCommand, UpdateSemantics,
};

use super::entity::{Entity, SecondaryIndex};
use super::error::ValidationError;
use super::types::Taxonomy;

/// Gives a new record its server-assigned identity.
///
/// Any caller-supplied key is replaced.
pub fn assign_identity<E: Entity>(mut record: E, id: Uuid, now: DateTime<Utc>) -> E {
    record.set_id(id.to_string());
    record.on_create(now);
    record
}

/// Extracts the primary key; all other attributes are ignored.
pub fn primary_key<E: Entity>(record: &E) -> Result<Key, ValidationError> {
    match record.id().map(str::trim) {
        Some(id) if !id.is_empty() => Ok(Key::new(E::KEY_FIELD, id)),
        _ => Err(ValidationError::MissingKey {
            entity_type: E::ENTITY_TYPE,
            field: E::KEY_FIELD,
        }),
    }
}

/// Serializes a record into a storage item.
pub fn to_item<E: Entity>(record: &E) -> Result<Item, RepositoryError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(RepositoryError::Serialization(format!(
            "{} serialized to a non-object: {other}",
            E::ENTITY_TYPE
        ))),
        Err(e) => Err(RepositoryError::Serialization(e.to_string())),
    }
}

/// Deserializes a storage item into a record.
pub fn from_item<E: Entity>(item: Item) -> Result<E, RepositoryError> {
    serde_json::from_value(Value::Object(item)).map_err(|e| {
        RepositoryError::InvalidData(format!("Invalid {} record: {e}", E::ENTITY_TYPE))
    })
}

/// Builds the field-level update for a serialized record.
///
/// Only `E::UPDATABLE_FIELDS` are considered, in that order. With
/// [`UpdateSemantics::Overwrite`] attributes absent from `attributes` are
/// removed; with [`UpdateSemantics::Partial`] they are left alone.
pub fn build_update_command<E: Entity>(
    key: Key,
    attributes: &Item,
    semantics: UpdateSemantics,
) -> UpdateCommand {
    let actions = E::UPDATABLE_FIELDS
        .iter()
        .filter_map(|field| match attributes.get(*field) {
            Some(value) if !value.is_null() => Some(UpdateAction::Set {
                attribute: field.to_string(),
                value: value.clone(),
            }),
            _ => match semantics {
                UpdateSemantics::Overwrite => Some(UpdateAction::Remove {
                    attribute: field.to_string(),
                }),
                UpdateSemantics::Partial => None,
            },
        })
        .collect();

    UpdateCommand { key, actions }
}

/// Builds the children query for a taxonomy's `ParentId`.
pub fn parent_query(
    record: &Taxonomy,
    index: &SecondaryIndex,
) -> Result<IndexQuery, ValidationError> {
    let parent_id = match record.parent_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => return Err(ValidationError::MissingParent),
    };

    Ok(IndexQuery {
        index_name: index.name.clone(),
        partition_attribute: index.partition_key.to_string(),
        partition_value: Value::String(parent_id.to_string()),
        sort_attribute: index.sort_key.map(str::to_string),
    })
}
