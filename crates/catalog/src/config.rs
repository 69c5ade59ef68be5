use std::env;

use catalog_core::storage::UpdateSemantics;

pub const DEFAULT_PRODUCT_TABLE: &str = "Products";
pub const DEFAULT_TAXONOMY_TABLE: &str = "ProductTaxonomyAttributes";
pub const DEFAULT_TAXONOMY_PARENT_INDEX: &str = "ParentIndex";

/// What the invoker sees when storage fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// `null` for single-record operations, `[]` for list operations.
    #[default]
    Soft,
    /// `{ "status": <code> }`.
    Strict,
}

impl std::str::FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "soft" => Ok(FailurePolicy::Soft),
            "strict" => Ok(FailurePolicy::Strict),
            other => Err(format!("Unknown failure policy: {other}")),
        }
    }
}

/// Resolver configuration, built once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// AWS region; `None` defers to the SDK default chain.
    pub aws_region: Option<String>,
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    pub product_table_name: String,
    pub taxonomy_table_name: String,
    /// Secondary index over `(ParentId, Name)` on the taxonomy table.
    pub taxonomy_parent_index: String,
    pub update_semantics: UpdateSemantics,
    pub failure_policy: FailurePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            aws_region: None,
            endpoint_url: None,
            product_table_name: DEFAULT_PRODUCT_TABLE.to_string(),
            taxonomy_table_name: DEFAULT_TAXONOMY_TABLE.to_string(),
            taxonomy_parent_index: DEFAULT_TAXONOMY_PARENT_INDEX.to_string(),
            update_semantics: UpdateSemantics::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REGION` - AWS region (default: SDK default chain)
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: none)
    /// - `PRODUCT_TABLE_NAME` - Product table (default: "Products")
    /// - `TAXONOMY_TABLE_NAME` - Taxonomy table (default: "ProductTaxonomyAttributes")
    /// - `TAXONOMY_TABLE_GSI_NAME` - Parent index (default: "ParentIndex")
    /// - `UPDATE_SEMANTICS` - `partial` or `overwrite` (default: `partial`)
    /// - `STORAGE_FAILURE_POLICY` - `soft` or `strict` (default: `soft`)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            aws_region: var("REGION"),
            endpoint_url: var("AWS_ENDPOINT_URL"),
            product_table_name: var("PRODUCT_TABLE_NAME").unwrap_or(defaults.product_table_name),
            taxonomy_table_name: var("TAXONOMY_TABLE_NAME")
                .unwrap_or(defaults.taxonomy_table_name),
            taxonomy_parent_index: var("TAXONOMY_TABLE_GSI_NAME")
                .unwrap_or(defaults.taxonomy_parent_index),
            update_semantics: parse_or_default(var("UPDATE_SEMANTICS"), "UPDATE_SEMANTICS"),
            failure_policy: parse_or_default(
                var("STORAGE_FAILURE_POLICY"),
                "STORAGE_FAILURE_POLICY",
            ),
        }
    }
}

fn parse_or_default<T>(value: Option<String>, name: &str) -> T
where
    T: std::str::FromStr<Err = String> + Default,
{
    match value.map(|v| v.parse::<T>()) {
        Some(Ok(parsed)) => parsed,
        Some(Err(error)) => {
            tracing::warn!(variable = name, %error, "Ignoring invalid configuration value");
            T::default()
        }
        None => T::default(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = config_from(&[]);

        assert_eq!(config.aws_region, None);
        assert_eq!(config.endpoint_url, None);
        assert_eq!(config.product_table_name, "Products");
        assert_eq!(config.taxonomy_table_name, "ProductTaxonomyAttributes");
        assert_eq!(config.taxonomy_parent_index, "ParentIndex");
        assert_eq!(config.update_semantics, UpdateSemantics::Partial);
        assert_eq!(config.failure_policy, FailurePolicy::Soft);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_loading_region() {
        let config = config_from(&[("REGION", "us-east-1")]);
        assert_eq!(config.aws_region.as_deref(), Some("us-east-1"));
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("AWS_ENDPOINT_URL", "http://localhost:8000"),
            ("PRODUCT_TABLE_NAME", "products-dev"),
            ("TAXONOMY_TABLE_NAME", "taxonomy-dev"),
            ("TAXONOMY_TABLE_GSI_NAME", "ByParent"),
            ("UPDATE_SEMANTICS", "overwrite"),
            ("STORAGE_FAILURE_POLICY", "strict"),
        ]);

        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.product_table_name, "products-dev");
        assert_eq!(config.taxonomy_table_name, "taxonomy-dev");
        assert_eq!(config.taxonomy_parent_index, "ByParent");
        assert_eq!(config.update_semantics, UpdateSemantics::Overwrite);
        assert_eq!(config.failure_policy, FailurePolicy::Strict);
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = config_from(&[("REGION", ""), ("PRODUCT_TABLE_NAME", "  ")]);
        assert_eq!(config.aws_region, None);
        assert_eq!(config.product_table_name, "Products");
    }

    #[test]
    fn test_invalid_enum_values_fall_back_to_defaults() {
        let config = config_from(&[
            ("UPDATE_SEMANTICS", "merge"),
            ("STORAGE_FAILURE_POLICY", "loud"),
        ]);
        assert_eq!(config.update_semantics, UpdateSemantics::Partial);
        assert_eq!(config.failure_policy, FailurePolicy::Soft);
    }
}
