use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record stored under a single string primary key.
///
/// Implementors describe their own schema so the table operations can stay
/// generic: which attribute is the key and which attributes an update may
/// touch. Server-assigned fields are stamped through the `on_*` hooks.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Human readable entity name, used in errors and logs.
    const ENTITY_TYPE: &'static str;

    /// Name of the primary key attribute.
    const KEY_FIELD: &'static str;

    /// Non-key attributes an update command covers, in expression order.
    const UPDATABLE_FIELDS: &'static [&'static str];

    /// The primary key value, if present.
    fn id(&self) -> Option<&str>;

    /// Replaces the primary key value.
    fn set_id(&mut self, id: String);

    /// Stamps server-managed fields and normalizes input before the first write.
    fn on_create(&mut self, _now: DateTime<Utc>) {}

    /// Stamps server-managed fields and normalizes input before an update.
    fn on_update(&mut self, _now: DateTime<Utc>) {}
}

/// A secondary index with a string partition key and an optional sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryIndex {
    pub name: String,
    pub partition_key: &'static str,
    pub sort_key: Option<&'static str>,
}
