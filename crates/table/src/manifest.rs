//! TOML table manifests.
//!
//! A manifest describes one table declaratively:
//!
//! ```toml
//! table_name = "users"
//! billing_mode = "PROVISIONED"
//! read_capacity = 5
//! stream_view_type = "NEW_AND_OLD_IMAGES"
//! hash_key = { name = "id", type = "S" }
//!
//! [[global_indexes]]
//! name = "by_email"
//! projection = "INCLUDE"
//! hash_key = { name = "email", type = "S" }
//! attributes = [{ name = "display_name", type = "S" }]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::schema::{IndexDefinition, IndexOption, TableDefinition, TableOption};
use crate::types::{Attribute, BillingMode, ProjectionType, StreamViewType};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableManifest {
    pub table_name: String,
    pub hash_key: Attribute,
    pub range_key: Option<Attribute>,
    pub billing_mode: Option<BillingMode>,
    pub read_capacity: Option<i64>,
    pub write_capacity: Option<i64>,
    pub stream_view_type: Option<StreamViewType>,
    #[serde(default)]
    pub global_indexes: Vec<IndexManifest>,
    #[serde(default)]
    pub local_indexes: Vec<IndexManifest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexManifest {
    pub name: String,
    pub projection: ProjectionType,
    pub hash_key: Option<Attribute>,
    pub range_key: Option<Attribute>,
    /// Non-key attributes projected into the index.
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    pub read_capacity: Option<i64>,
    pub write_capacity: Option<i64>,
}

impl IndexManifest {
    fn options(&self) -> Vec<IndexOption> {
        let mut options: Vec<IndexOption> = Vec::new();
        options.extend(self.hash_key.clone().map(IndexOption::HashKey));
        options.extend(self.range_key.clone().map(IndexOption::RangeKey));
        options.extend(self.attributes.iter().cloned().map(IndexOption::Attribute));
        options.extend(self.read_capacity.map(IndexOption::ReadCapacity));
        options.extend(self.write_capacity.map(IndexOption::WriteCapacity));
        options
    }

    fn definition(&self) -> IndexDefinition {
        IndexDefinition::from_options(self.name.clone(), self.projection, self.options())
    }
}

impl TableManifest {
    /// Parse and validate a manifest from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Read, parse and validate a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the manifest for values the service would reject outright.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_name.trim().is_empty() {
            return Err(ConfigError::Invalid("table_name must not be empty".into()));
        }
        if self.hash_key.name.trim().is_empty() {
            return Err(ConfigError::Invalid("hash_key name must not be empty".into()));
        }
        check_capacity("table", self.read_capacity, self.write_capacity)?;

        let mut names = HashSet::new();
        for index in self.global_indexes.iter().chain(&self.local_indexes) {
            if index.name.trim().is_empty() {
                return Err(ConfigError::Invalid("index name must not be empty".into()));
            }
            if !names.insert(index.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate index name: {}",
                    index.name
                )));
            }
            check_capacity(&index.name, index.read_capacity, index.write_capacity)?;
        }
        Ok(())
    }

    /// Table options declared by the manifest, excluding the hash key.
    pub fn table_options(&self) -> Vec<TableOption> {
        let mut options: Vec<TableOption> = Vec::new();
        options.extend(self.range_key.clone().map(TableOption::RangeKey));
        options.extend(self.billing_mode.map(TableOption::BillingMode));
        options.extend(self.read_capacity.map(TableOption::ReadCapacity));
        options.extend(self.write_capacity.map(TableOption::WriteCapacity));
        options.extend(self.stream_view_type.map(TableOption::Stream));
        options.extend(
            self.global_indexes
                .iter()
                .map(|index| TableOption::GlobalIndex(index.definition())),
        );
        options.extend(
            self.local_indexes
                .iter()
                .map(|index| TableOption::LocalIndex(index.definition())),
        );
        options
    }

    /// The full table definition, hash key first.
    pub fn definition(&self) -> TableDefinition {
        TableDefinition::from_options(
            std::iter::once(TableOption::HashKey(self.hash_key.clone()))
                .chain(self.table_options()),
        )
    }
}

fn check_capacity(owner: &str, read: Option<i64>, write: Option<i64>) -> Result<(), ConfigError> {
    for (label, units) in [("read_capacity", read), ("write_capacity", write)] {
        if let Some(units) = units
            && units < 1
        {
            return Err(ConfigError::Invalid(format!(
                "{owner}: {label} must be positive, got {units}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Capacity;
    use crate::types::ScalarType;

    const FULL: &str = r#"
table_name = "users"
billing_mode = "PROVISIONED"
read_capacity = 5
write_capacity = 7
stream_view_type = "NEW_AND_OLD_IMAGES"
hash_key = { name = "id", type = "S" }
range_key = { name = "created_at", type = "N" }

[[global_indexes]]
name = "by_email"
projection = "INCLUDE"
hash_key = { name = "email", type = "S" }
attributes = [{ name = "display_name", type = "S" }]
read_capacity = 2

[[local_indexes]]
name = "by_updated"
projection = "KEYS_ONLY"
hash_key = { name = "id", type = "S" }
range_key = { name = "updated_at", type = "N" }
"#;

    #[test]
    fn parses_full_manifest() {
        let manifest = TableManifest::from_toml_str(FULL).unwrap();
        assert_eq!(manifest.table_name, "users");
        assert_eq!(manifest.stream_view_type, Some(StreamViewType::NewAndOldImages));

        let definition = manifest.definition();
        assert_eq!(definition.keys.hash_key, Some(Attribute::new("id", ScalarType::S)));
        assert_eq!(definition.capacity, Capacity::new(5, 7));
        assert_eq!(definition.global_indexes[0].capacity, Capacity::new(2, 3));
        assert_eq!(definition.local_indexes[0].name, "by_updated");

        let request = definition.render(&manifest.table_name);
        let names: Vec<_> = request
            .attribute_definitions
            .iter()
            .map(|a| a.attribute_name.as_str())
            .collect();
        assert_eq!(
            names,
            ["id", "created_at", "email", "display_name", "updated_at"]
        );
    }

    #[test]
    fn minimal_manifest_uses_defaults() {
        let manifest = TableManifest::from_toml_str(
            r#"table_name = "t"
hash_key = { name = "id", type = "S" }"#,
        )
        .unwrap();
        assert!(manifest.table_options().is_empty());
        assert_eq!(
            manifest.definition(),
            TableDefinition::new().with_hash_key("id", ScalarType::S)
        );
    }

    #[test]
    fn rejects_unknown_billing_mode() {
        let err = TableManifest::from_toml_str(
            r#"table_name = "t"
billing_mode = "ON_DEMAND"
hash_key = { name = "id", type = "S" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = TableManifest::from_toml_str(
            r#"table_name = "t"
sort_key = { name = "ts", type = "N" }
hash_key = { name = "id", type = "S" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_empty_table_name() {
        let err = TableManifest::from_toml_str(
            r#"table_name = ""
hash_key = { name = "id", type = "S" }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_capacity() {
        let err = TableManifest::from_toml_str(
            r#"table_name = "t"
read_capacity = 0
hash_key = { name = "id", type = "S" }"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid manifest: table: read_capacity must be positive, got 0"
        );
    }

    #[test]
    fn rejects_duplicate_index_names() {
        let err = TableManifest::from_toml_str(
            r#"table_name = "t"
hash_key = { name = "id", type = "S" }

[[global_indexes]]
name = "dup"
projection = "ALL"

[[local_indexes]]
name = "dup"
projection = "ALL"
"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "invalid manifest: duplicate index name: dup");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = TableManifest::load("/nonexistent/table.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
