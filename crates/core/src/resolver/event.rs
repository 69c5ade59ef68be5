//! Wire types of the resolver entry point.
//!
//! The invoker sends `{ "info": { "fieldName": ... }, "arguments": { ... } }`
//! and expects back a record, a list, a boolean, `null`, or a failure object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::ValidationError;
use crate::storage::Item;

use super::Operation;

/// Field metadata of a resolver invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverInfo {
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_type_name: Option<String>,
}

/// An inbound resolver invocation.
///
/// `arguments` stays raw until the field is known to resolve, so an unknown
/// field never fails on its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolverEvent {
    pub info: ResolverInfo,
    #[serde(default)]
    pub arguments: Value,
}

impl ResolverEvent {
    /// Builds an event for a field name and argument record.
    pub fn new(field_name: impl Into<String>, arguments: Item) -> Self {
        Self {
            info: ResolverInfo {
                field_name: field_name.into(),
                parent_type_name: None,
            },
            arguments: Value::Object(arguments),
        }
    }

    pub fn field_name(&self) -> &str {
        &self.info.field_name
    }

    /// The argument record; missing or `null` arguments are an empty record.
    pub fn into_arguments(self) -> Result<Item, ValidationError> {
        match self.arguments {
            Value::Null => Ok(Item::new()),
            Value::Object(arguments) => Ok(arguments),
            other => Err(ValidationError::MalformedArguments(format!(
                "arguments must be an object, found {other}"
            ))),
        }
    }
}

/// The outcome of a dispatched operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// Not found, unknown operation, or a swallowed failure.
    Null,
    Record(Value),
    Records(Vec<Value>),
    Deleted(bool),
}

impl Resolved {
    /// The benign empty result an operation reports instead of a failure.
    pub fn empty_for(operation: Operation) -> Self {
        if operation.returns_collection() {
            Resolved::Records(Vec::new())
        } else {
            Resolved::Null
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            Resolved::Null => Value::Null,
            Resolved::Record(record) => record,
            Resolved::Records(records) => Value::Array(records),
            Resolved::Deleted(deleted) => Value::Bool(deleted),
        }
    }
}

/// The failure indicator returned to the invoker. Carries no detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureResponse {
    pub status: u16,
}

impl FailureResponse {
    pub const INTERNAL: FailureResponse = FailureResponse { status: 500 };

    pub fn new(status: u16) -> Self {
        Self { status }
    }

    pub fn into_json(self) -> Value {
        serde_json::json!({ "status": self.status })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decode_event() {
        let event: ResolverEvent = serde_json::from_value(json!({
            "info": {"fieldName": "getProduct", "parentTypeName": "Query"},
            "arguments": {"ProductId": "p-1"}
        }))
        .unwrap();

        assert_eq!(event.field_name(), "getProduct");
        assert_eq!(event.info.parent_type_name.as_deref(), Some("Query"));
        assert_eq!(
            event.into_arguments().unwrap().get("ProductId"),
            Some(&json!("p-1"))
        );
    }

    #[test]
    fn test_decode_event_without_arguments() {
        let event: ResolverEvent =
            serde_json::from_value(json!({"info": {"fieldName": "listProducts"}})).unwrap();
        assert!(event.into_arguments().unwrap().is_empty());

        let event: ResolverEvent = serde_json::from_value(json!({
            "info": {"fieldName": "listProducts"},
            "arguments": null
        }))
        .unwrap();
        assert!(event.into_arguments().unwrap().is_empty());
    }

    #[test]
    fn test_non_object_arguments_decode_but_are_rejected() {
        let event: ResolverEvent = serde_json::from_value(json!({
            "info": {"fieldName": "getProduct"},
            "arguments": "x"
        }))
        .unwrap();

        assert_eq!(event.field_name(), "getProduct");
        assert!(matches!(
            event.into_arguments(),
            Err(ValidationError::MalformedArguments(_))
        ));
    }

    #[test]
    fn test_new_event_carries_arguments() {
        let mut arguments = Item::new();
        arguments.insert("TaxonomyId".to_string(), json!("t-1"));

        let event = ResolverEvent::new("getTaxonomy", arguments.clone());

        assert_eq!(event.into_arguments(), Ok(arguments));
    }

    #[test]
    fn test_decode_event_without_info_fails() {
        let result: Result<ResolverEvent, _> =
            serde_json::from_value(json!({"arguments": {}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolved_into_json() {
        assert_eq!(Resolved::Null.into_json(), Value::Null);
        assert_eq!(Resolved::Deleted(true).into_json(), json!(true));
        assert_eq!(
            Resolved::Records(vec![json!({"Name": "A"})]).into_json(),
            json!([{"Name": "A"}])
        );
        assert_eq!(
            Resolved::Record(json!({"Name": "A"})).into_json(),
            json!({"Name": "A"})
        );
    }

    #[test]
    fn test_empty_for() {
        assert_eq!(Resolved::empty_for(Operation::GetProduct), Resolved::Null);
        assert_eq!(Resolved::empty_for(Operation::DeleteTaxonomy), Resolved::Null);
        assert_eq!(
            Resolved::empty_for(Operation::GetTaxonomiesByParent),
            Resolved::Records(Vec::new())
        );
    }

    #[test]
    fn test_failure_response_json() {
        assert_eq!(FailureResponse::INTERNAL.into_json(), json!({"status": 500}));
        assert_eq!(FailureResponse::new(400).into_json(), json!({"status": 400}));
    }
}
