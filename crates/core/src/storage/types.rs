use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

/// A stored document: attribute name to JSON value.
pub type Item = Map<String, Value>;

/// A primary key: one string attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub attribute: String,
    pub value: String,
}

impl Key {
    pub fn new(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.attribute, self.value)
    }
}

/// One clause of a field-level update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Set the attribute to the value.
    Set { attribute: String, value: Value },
    /// Drop the attribute from the record.
    Remove { attribute: String },
}

impl UpdateAction {
    pub fn attribute(&self) -> &str {
        match self {
            UpdateAction::Set { attribute, .. } | UpdateAction::Remove { attribute } => attribute,
        }
    }
}

/// A keyed update applied as a single atomic mutation.
///
/// Storage creates the record when the key does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCommand {
    pub key: Key,
    pub actions: Vec<UpdateAction>,
}

impl UpdateCommand {
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Applies the actions to a record in place.
    ///
    /// The key attribute is always (re)written so a fresh record carries it.
    pub fn apply(&self, item: &mut Item) {
        item.insert(
            self.key.attribute.clone(),
            Value::String(self.key.value.clone()),
        );
        for action in &self.actions {
            match action {
                UpdateAction::Set { attribute, value } => {
                    item.insert(attribute.clone(), value.clone());
                }
                UpdateAction::Remove { attribute } => {
                    item.remove(attribute);
                }
            }
        }
    }
}

/// How an update treats updatable attributes missing from the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpdateSemantics {
    /// Only attributes present in the request are written.
    #[default]
    Partial,
    /// Every updatable attribute is written; absent ones are removed.
    Overwrite,
}

impl FromStr for UpdateSemantics {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "partial" => Ok(UpdateSemantics::Partial),
            "overwrite" => Ok(UpdateSemantics::Overwrite),
            other => Err(format!("Unknown update semantics: {other}")),
        }
    }
}

/// An equality query on a secondary index partition key, read in ascending
/// sort-key order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexQuery {
    pub index_name: String,
    pub partition_attribute: String,
    pub partition_value: Value,
    pub sort_attribute: Option<String>,
}

impl IndexQuery {
    /// Whether the item belongs to the queried partition.
    ///
    /// Items missing any index key attribute are not part of the index.
    pub fn matches(&self, item: &Item) -> bool {
        let in_partition = item.get(&self.partition_attribute) == Some(&self.partition_value);
        let has_sort_key = self
            .sort_attribute
            .as_ref()
            .is_none_or(|attribute| item.get(attribute).is_some_and(|v| !v.is_null()));
        in_partition && has_sort_key
    }

    /// Orders matching items by the sort attribute, ascending.
    pub fn sort(&self, items: &mut [Item]) {
        if let Some(attribute) = &self.sort_attribute {
            items.sort_by(|a, b| compare_values(a.get(attribute), b.get(attribute)));
        }
    }
}

/// Orders strings by bytes and numbers numerically, like index sort keys.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(a)), Some(Value::String(b))) => a.as_bytes().cmp(b.as_bytes()),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn item(value: Value) -> Item {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn parent_query() -> IndexQuery {
        IndexQuery {
            index_name: "ParentIndex".to_string(),
            partition_attribute: "ParentId".to_string(),
            partition_value: json!("root"),
            sort_attribute: Some("Name".to_string()),
        }
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new("ProductId", "p-1").to_string(), "ProductId=p-1");
    }

    #[test]
    fn test_apply_sets_and_removes() {
        let command = UpdateCommand {
            key: Key::new("TaxonomyId", "t-1"),
            actions: vec![
                UpdateAction::Set {
                    attribute: "Name".to_string(),
                    value: json!("Laptops"),
                },
                UpdateAction::Remove {
                    attribute: "Type".to_string(),
                },
            ],
        };
        let mut record = item(json!({"TaxonomyId": "t-1", "Name": "Old", "Type": "Leaf"}));

        command.apply(&mut record);

        assert_eq!(record, item(json!({"TaxonomyId": "t-1", "Name": "Laptops"})));
    }

    #[test]
    fn test_apply_on_missing_record_writes_key() {
        let command = UpdateCommand {
            key: Key::new("TaxonomyId", "t-9"),
            actions: vec![UpdateAction::Set {
                attribute: "Name".to_string(),
                value: json!("New"),
            }],
        };
        let mut record = Item::new();

        command.apply(&mut record);

        assert_eq!(record, item(json!({"TaxonomyId": "t-9", "Name": "New"})));
    }

    #[test]
    fn test_update_semantics_from_str() {
        assert_eq!("partial".parse(), Ok(UpdateSemantics::Partial));
        assert_eq!(" Overwrite ".parse(), Ok(UpdateSemantics::Overwrite));
        assert!("merge".parse::<UpdateSemantics>().is_err());
        assert_eq!(UpdateSemantics::default(), UpdateSemantics::Partial);
    }

    #[test]
    fn test_index_query_matches_partition() {
        let query = parent_query();
        assert!(query.matches(&item(json!({"ParentId": "root", "Name": "A"}))));
        assert!(!query.matches(&item(json!({"ParentId": "other", "Name": "A"}))));
        assert!(!query.matches(&item(json!({"Name": "A"}))));
    }

    #[test]
    fn test_index_query_skips_items_without_sort_key() {
        let query = parent_query();
        assert!(!query.matches(&item(json!({"ParentId": "root"}))));
        assert!(!query.matches(&item(json!({"ParentId": "root", "Name": null}))));
    }

    #[test]
    fn test_index_query_sorts_ascending_by_bytes() {
        let query = parent_query();
        let mut items = vec![
            item(json!({"Name": "phones"})),
            item(json!({"Name": "Laptops"})),
            item(json!({"Name": "Cameras"})),
        ];

        query.sort(&mut items);

        let names: Vec<&str> = items
            .iter()
            .map(|i| i.get("Name").and_then(Value::as_str).unwrap())
            .collect();
        // Uppercase sorts before lowercase.
        assert_eq!(names, vec!["Cameras", "Laptops", "phones"]);
    }

    #[test]
    fn test_compare_numbers() {
        assert_eq!(
            compare_values(Some(&json!(2)), Some(&json!(10))),
            Ordering::Less
        );
    }
}
