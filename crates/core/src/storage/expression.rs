//! Rendering of update commands and index queries into expression strings.
//!
//! Attribute names never appear literally in an expression: every name goes
//! through a `#n<i>` placeholder and every value through `:v<i>`, so reserved
//! words such as `Name` or `Type` cannot collide with the expression grammar.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{IndexQuery, UpdateAction, UpdateCommand};

/// An expression with its placeholder substitutions.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedExpression {
    pub expression: String,
    pub attribute_names: BTreeMap<String, String>,
    pub attribute_values: BTreeMap<String, Value>,
}

/// Renders an update command as `SET ... REMOVE ...`.
///
/// Returns `None` for a command without actions; an empty update expression
/// is rejected by storage.
pub fn render_update(command: &UpdateCommand) -> Option<RenderedExpression> {
    if command.is_empty() {
        return None;
    }

    let mut attribute_names = BTreeMap::new();
    let mut attribute_values = BTreeMap::new();
    let mut sets = Vec::new();
    let mut removes = Vec::new();

    for (index, action) in command.actions.iter().enumerate() {
        let name = format!("#n{index}");
        attribute_names.insert(name.clone(), action.attribute().to_string());
        match action {
            UpdateAction::Set { value, .. } => {
                let placeholder = format!(":v{index}");
                sets.push(format!("{name} = {placeholder}"));
                attribute_values.insert(placeholder, value.clone());
            }
            UpdateAction::Remove { .. } => removes.push(name),
        }
    }

    let mut clauses = Vec::with_capacity(2);
    if !sets.is_empty() {
        clauses.push(format!("SET {}", sets.join(", ")));
    }
    if !removes.is_empty() {
        clauses.push(format!("REMOVE {}", removes.join(", ")));
    }

    Some(RenderedExpression {
        expression: clauses.join(" "),
        attribute_names,
        attribute_values,
    })
}

/// Renders the partition-key equality condition of an index query.
pub fn render_key_condition(query: &IndexQuery) -> RenderedExpression {
    RenderedExpression {
        expression: "#pk = :pk".to_string(),
        attribute_names: BTreeMap::from([("#pk".to_string(), query.partition_attribute.clone())]),
        attribute_values: BTreeMap::from([(":pk".to_string(), query.partition_value.clone())]),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::Key;

    fn set(attribute: &str, value: Value) -> UpdateAction {
        UpdateAction::Set {
            attribute: attribute.to_string(),
            value,
        }
    }

    fn remove(attribute: &str) -> UpdateAction {
        UpdateAction::Remove {
            attribute: attribute.to_string(),
        }
    }

    #[test]
    fn test_render_set_only() {
        let command = UpdateCommand {
            key: Key::new("ProductId", "p-1"),
            actions: vec![set("Name", json!("Laptop")), set("Price", json!(999.5))],
        };

        let rendered = render_update(&command).unwrap();

        assert_eq!(rendered.expression, "SET #n0 = :v0, #n1 = :v1");
        assert_eq!(rendered.attribute_names["#n0"], "Name");
        assert_eq!(rendered.attribute_names["#n1"], "Price");
        assert_eq!(rendered.attribute_values[":v0"], json!("Laptop"));
        assert_eq!(rendered.attribute_values[":v1"], json!(999.5));
    }

    #[test]
    fn test_render_set_and_remove() {
        let command = UpdateCommand {
            key: Key::new("TaxonomyId", "t-1"),
            actions: vec![
                set("Name", json!("Laptops")),
                remove("Description"),
                set("ParentId", json!("t-0")),
                remove("Type"),
            ],
        };

        let rendered = render_update(&command).unwrap();

        assert_eq!(
            rendered.expression,
            "SET #n0 = :v0, #n2 = :v2 REMOVE #n1, #n3"
        );
        assert_eq!(rendered.attribute_names.len(), 4);
        assert_eq!(rendered.attribute_names["#n3"], "Type");
        assert_eq!(rendered.attribute_values.len(), 2);
        assert!(!rendered.attribute_values.contains_key(":v1"));
    }

    #[test]
    fn test_render_remove_only_has_no_values() {
        let command = UpdateCommand {
            key: Key::new("TaxonomyId", "t-1"),
            actions: vec![remove("Name")],
        };

        let rendered = render_update(&command).unwrap();

        assert_eq!(rendered.expression, "REMOVE #n0");
        assert!(rendered.attribute_values.is_empty());
    }

    #[test]
    fn test_render_empty_command() {
        let command = UpdateCommand {
            key: Key::new("TaxonomyId", "t-1"),
            actions: Vec::new(),
        };
        assert_eq!(render_update(&command), None);
    }

    #[test]
    fn test_render_key_condition() {
        let query = IndexQuery {
            index_name: "ParentIndex".to_string(),
            partition_attribute: "ParentId".to_string(),
            partition_value: json!("t-0"),
            sort_attribute: Some("Name".to_string()),
        };

        let rendered = render_key_condition(&query);

        assert_eq!(rendered.expression, "#pk = :pk");
        assert_eq!(rendered.attribute_names["#pk"], "ParentId");
        assert_eq!(rendered.attribute_values[":pk"], json!("t-0"));
    }
}
