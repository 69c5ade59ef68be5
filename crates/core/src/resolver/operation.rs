use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The closed set of resolver field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetProduct,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    ListProducts,
    GetTaxonomy,
    CreateTaxonomy,
    UpdateTaxonomy,
    DeleteTaxonomy,
    ListTaxonomies,
    GetTaxonomiesByParent,
}

/// A field name outside the dispatch table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl Operation {
    pub const ALL: [Operation; 11] = [
        Operation::GetProduct,
        Operation::CreateProduct,
        Operation::UpdateProduct,
        Operation::DeleteProduct,
        Operation::ListProducts,
        Operation::GetTaxonomy,
        Operation::CreateTaxonomy,
        Operation::UpdateTaxonomy,
        Operation::DeleteTaxonomy,
        Operation::ListTaxonomies,
        Operation::GetTaxonomiesByParent,
    ];

    /// The GraphQL field name this operation resolves.
    pub fn field_name(&self) -> &'static str {
        match self {
            Operation::GetProduct => "getProduct",
            Operation::CreateProduct => "createProduct",
            Operation::UpdateProduct => "updateProduct",
            Operation::DeleteProduct => "deleteProduct",
            Operation::ListProducts => "listProducts",
            Operation::GetTaxonomy => "getTaxonomy",
            Operation::CreateTaxonomy => "createTaxonomy",
            Operation::UpdateTaxonomy => "updateTaxonomy",
            Operation::DeleteTaxonomy => "deleteTaxonomy",
            Operation::ListTaxonomies => "listTaxonomies",
            Operation::GetTaxonomiesByParent => "getTaxonomiesByParent",
        }
    }

    /// Whether the operation yields a list of records.
    pub fn returns_collection(&self) -> bool {
        matches!(
            self,
            Operation::ListProducts | Operation::ListTaxonomies | Operation::GetTaxonomiesByParent
        )
    }
}

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|operation| operation.field_name() == s)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_name_parses_back() {
        for operation in Operation::ALL {
            assert_eq!(operation.field_name().parse(), Ok(operation));
        }
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        assert_eq!(
            "GetProduct".parse::<Operation>(),
            Err(UnknownOperation("GetProduct".to_string()))
        );
    }

    #[test]
    fn test_unknown_operation() {
        let error = "archiveProduct".parse::<Operation>().unwrap_err();
        assert_eq!(error.to_string(), "Unknown operation: archiveProduct");
    }

    #[test]
    fn test_collection_operations() {
        let collections: Vec<Operation> = Operation::ALL
            .into_iter()
            .filter(Operation::returns_collection)
            .collect();
        assert_eq!(
            collections,
            vec![
                Operation::ListProducts,
                Operation::ListTaxonomies,
                Operation::GetTaxonomiesByParent
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::ListTaxonomies.to_string(), "listTaxonomies");
    }
}
