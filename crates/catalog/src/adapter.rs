//! Boundary between the invoker's JSON and the dispatcher.
//!
//! Every outcome becomes a JSON value: a record, a list, `true`, `null`, or
//! a `{ "status": <code> }` failure object. What a storage failure turns into
//! depends on the configured [`FailurePolicy`].

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;

use catalog_core::resolver::{FailureResponse, Operation, Resolved, ResolverEvent};
use catalog_core::storage::TableStore;

use crate::config::{Config, FailurePolicy};
use crate::dispatch::Dispatcher;
use crate::error::OperationError;

/// Handles resolver invocations.
#[derive(Clone)]
pub struct Resolver {
    dispatcher: Dispatcher,
    failure_policy: FailurePolicy,
}

impl Resolver {
    pub fn new(config: &Config, store: Arc<dyn TableStore>) -> Self {
        Self {
            dispatcher: Dispatcher::new(config, store),
            failure_policy: config.failure_policy,
        }
    }

    /// Handles one invocation. Never fails: errors become failure values.
    pub async fn handle(&self, event: Value) -> Value {
        let event: ResolverEvent = match serde_json::from_value(event) {
            Ok(event) => event,
            Err(error) => {
                tracing::error!(error = %error, "Invalid resolver event");
                return FailureResponse::INTERNAL.into_json();
            }
        };

        let operation = match event.field_name().parse::<Operation>() {
            Ok(operation) => operation,
            Err(unknown) => {
                tracing::warn!(field_name = event.field_name(), error = %unknown, "No resolver for field");
                return Value::Null;
            }
        };

        let arguments = match event.into_arguments() {
            Ok(arguments) => arguments,
            Err(error) => return self.failure(operation, error.into()),
        };

        let span = tracing::info_span!("resolve", field_name = %operation);
        let outcome = self
            .dispatcher
            .dispatch(operation, arguments)
            .instrument(span)
            .await;

        match outcome {
            Ok(resolved) => resolved.into_json(),
            Err(error) => self.failure(operation, error),
        }
    }

    fn failure(&self, operation: Operation, error: OperationError) -> Value {
        if !error.is_storage() {
            tracing::warn!(field_name = %operation, error = %error, "Rejected request");
            return FailureResponse::new(error.status_code()).into_json();
        }

        match self.failure_policy {
            FailurePolicy::Soft => Resolved::empty_for(operation).into_json(),
            FailurePolicy::Strict => FailureResponse::new(error.status_code()).into_json(),
        }
    }
}
