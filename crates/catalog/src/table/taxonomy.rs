use catalog_core::catalog::{parent_query, SecondaryIndex, Taxonomy};

use crate::error::Result;

use super::ops::{decode_all, TableOps};

impl TableOps<Taxonomy> {
    /// Children of the `ParentId` carried by `record`, ascending by `Name`.
    ///
    /// Follows every result page of the index.
    pub async fn query_by_parent(
        &self,
        index: &SecondaryIndex,
        record: &Taxonomy,
    ) -> Result<Vec<Taxonomy>> {
        let query = parent_query(record, index)?;
        let children = self
            .store()
            .query_index(self.table(), &query)
            .await
            .and_then(decode_all);
        self.logged("query_by_parent", children)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use catalog_core::catalog::ValidationError;
    use catalog_core::storage::UpdateSemantics;

    use super::*;
    use crate::error::OperationError;
    use crate::storage::InMemoryStore;

    fn ops() -> TableOps<Taxonomy> {
        TableOps::new(
            "ProductTaxonomyAttributes",
            Arc::new(InMemoryStore::new()),
            UpdateSemantics::Partial,
        )
    }

    fn index() -> SecondaryIndex {
        Taxonomy::parent_index("ParentIndex")
    }

    fn names(records: &[Taxonomy]) -> Vec<&str> {
        records.iter().filter_map(|t| t.name.as_deref()).collect()
    }

    #[tokio::test]
    async fn test_query_by_parent_returns_only_children_sorted() {
        let ops = ops();
        let electronics = ops.create(Taxonomy::new("Electronics")).await.unwrap();
        let parent_id = electronics.taxonomy_id.clone().unwrap();
        ops.create(Taxonomy::new("Phones").with_parent(&parent_id))
            .await
            .unwrap();
        ops.create(Taxonomy::new("Laptops").with_parent(&parent_id))
            .await
            .unwrap();
        ops.create(Taxonomy::new("Shirts").with_parent("clothing"))
            .await
            .unwrap();

        let children = ops
            .query_by_parent(&index(), &Taxonomy::children_of(&parent_id))
            .await
            .unwrap();

        assert_eq!(names(&children), vec!["Laptops", "Phones"]);
        assert!(children
            .iter()
            .all(|c| c.parent_id.as_deref() == Some(parent_id.as_str())));
    }

    #[tokio::test]
    async fn test_query_by_parent_without_children() {
        let children = ops()
            .query_by_parent(&index(), &Taxonomy::children_of("leaf"))
            .await
            .unwrap();
        assert!(children.is_empty());
    }

    #[tokio::test]
    async fn test_query_by_parent_requires_parent() {
        let result = ops()
            .query_by_parent(&index(), &Taxonomy::new("Laptops"))
            .await;
        assert_eq!(
            result,
            Err(OperationError::Validation(ValidationError::MissingParent))
        );
    }
}
