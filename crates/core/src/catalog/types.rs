use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, SecondaryIndex};

/// A product in the catalog.
///
/// Every field is optional: the same type carries create requests, partial
/// updates, key lookups and stored records. Field names are PascalCase on the
/// wire and in storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "crate::serde::optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(
        default,
        with = "crate::serde::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::serde::optional_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Creates an empty product with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates a key-only product, as used by get/delete requests.
    pub fn with_key(id: impl Into<String>) -> Self {
        Self {
            product_id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }
}

impl Entity for Product {
    const ENTITY_TYPE: &'static str = "Product";
    const KEY_FIELD: &'static str = "ProductId";
    const UPDATABLE_FIELDS: &'static [&'static str] = &[
        "Name",
        "Description",
        "Price",
        "Category",
        "Stock",
        "UpdatedAt",
    ];

    fn id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.product_id = Some(id);
    }

    fn on_create(&mut self, now: DateTime<Utc>) {
        self.created_at = Some(now);
        self.updated_at = Some(now);
    }

    fn on_update(&mut self, now: DateTime<Utc>) {
        self.created_at = None;
        self.updated_at = Some(now);
    }
}

/// A node of the product taxonomy tree.
///
/// `ParentId` may point at a taxonomy that does not exist; nothing enforces it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Taxonomy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub taxonomy_type: Option<String>,
}

impl Taxonomy {
    /// Attribute holding the parent reference.
    pub const PARENT_FIELD: &'static str = "ParentId";
    /// Attribute the parent index sorts on.
    pub const SORT_FIELD: &'static str = "Name";

    /// Creates a root taxonomy with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Creates a key-only taxonomy, as used by get/delete requests.
    pub fn with_key(id: impl Into<String>) -> Self {
        Self {
            taxonomy_id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Creates a parent-only taxonomy, as used by children lookups.
    pub fn children_of(parent_id: impl Into<String>) -> Self {
        Self {
            parent_id: Some(parent_id.into()),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_type(mut self, taxonomy_type: impl Into<String>) -> Self {
        self.taxonomy_type = Some(taxonomy_type.into());
        self
    }

    /// Drops a blank `ParentId`; a root node carries no parent attribute.
    fn clear_blank_parent(&mut self) {
        if self.parent_id.as_deref().is_some_and(|p| p.trim().is_empty()) {
            self.parent_id = None;
        }
    }

    /// The secondary index over `(ParentId, Name)` under the given name.
    pub fn parent_index(index_name: impl Into<String>) -> SecondaryIndex {
        SecondaryIndex {
            name: index_name.into(),
            partition_key: Self::PARENT_FIELD,
            sort_key: Some(Self::SORT_FIELD),
        }
    }
}

impl Entity for Taxonomy {
    const ENTITY_TYPE: &'static str = "Taxonomy";
    const KEY_FIELD: &'static str = "TaxonomyId";
    const UPDATABLE_FIELDS: &'static [&'static str] = &["Name", "Description", "ParentId", "Type"];

    fn id(&self) -> Option<&str> {
        self.taxonomy_id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.taxonomy_id = Some(id);
    }

    fn on_create(&mut self, _now: DateTime<Utc>) {
        self.clear_blank_parent();
    }

    fn on_update(&mut self, _now: DateTime<Utc>) {
        self.clear_blank_parent();
    }
}
