//! Rendering a [`TableDefinition`] into a [`CreateTableRequest`].
//!
//! Index declarations are stored as plain data; their throughput is resolved
//! here against the table's final billing mode.

use std::collections::HashMap;

use tracing::warn;

use crate::request::{
    AttributeDefinition, CreateTableRequest, GlobalSecondaryIndex, KeySchemaElement,
    LocalSecondaryIndex, Projection, ProvisionedThroughput, StreamSpecification,
};
use crate::schema::{Capacity, IndexDefinition, KeySchema, TableDefinition};
use crate::types::{Attribute, BillingMode, KeyType, ScalarType};

/// An attribute declared more than once with different types.
///
/// Rendering keeps `kept`; `ignored` is the later, conflicting declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeConflict {
    pub name: String,
    pub kept: ScalarType,
    pub ignored: ScalarType,
}

impl TableDefinition {
    /// Render the `CreateTable` request for `table_name`.
    pub fn render(&self, table_name: impl Into<String>) -> CreateTableRequest {
        let table_name = table_name.into();
        let (attribute_definitions, conflicts) = merge_attributes(self.referenced_attributes());
        for conflict in &conflicts {
            warn!(
                table = %table_name,
                attribute = %conflict.name,
                kept = %conflict.kept,
                ignored = %conflict.ignored,
                "attribute type conflict"
            );
        }

        CreateTableRequest {
            attribute_definitions,
            key_schema: key_schema_elements(&self.keys),
            billing_mode: self.billing_mode,
            provisioned_throughput: provisioned_throughput(self.billing_mode, self.capacity),
            global_secondary_indexes: self
                .global_indexes
                .iter()
                .map(|index| render_global_index(index, self.billing_mode))
                .collect(),
            local_secondary_indexes: self.local_indexes.iter().map(render_local_index).collect(),
            stream_specification: self.stream_view_type.map(|view| StreamSpecification {
                stream_enabled: true,
                stream_view_type: view,
            }),
            table_name,
        }
    }

    /// Attributes declared more than once with differing types.
    pub fn attribute_conflicts(&self) -> Vec<AttributeConflict> {
        merge_attributes(self.referenced_attributes()).1
    }
}

fn render_global_index(index: &IndexDefinition, billing_mode: BillingMode) -> GlobalSecondaryIndex {
    GlobalSecondaryIndex {
        index_name: index.name.clone(),
        key_schema: key_schema_elements(&index.keys),
        projection: projection(index),
        provisioned_throughput: provisioned_throughput(billing_mode, index.capacity),
    }
}

fn render_local_index(index: &IndexDefinition) -> LocalSecondaryIndex {
    LocalSecondaryIndex {
        index_name: index.name.clone(),
        key_schema: key_schema_elements(&index.keys),
        projection: projection(index),
    }
}

fn projection(index: &IndexDefinition) -> Projection {
    let non_key_attributes = if index.attributes.is_empty() {
        None
    } else {
        Some(index.attributes.iter().map(|a| a.name.clone()).collect())
    };
    Projection {
        projection_type: index.projection_type,
        non_key_attributes,
    }
}

fn key_schema_elements(keys: &KeySchema) -> Vec<KeySchemaElement> {
    let hash = keys.hash_key.iter().map(|attr| (attr, KeyType::Hash));
    let range = keys.range_key.iter().map(|attr| (attr, KeyType::Range));
    hash.chain(range)
        .map(|(attr, key_type)| KeySchemaElement {
            attribute_name: attr.name.clone(),
            key_type,
        })
        .collect()
}

fn provisioned_throughput(
    billing_mode: BillingMode,
    capacity: Capacity,
) -> Option<ProvisionedThroughput> {
    match billing_mode {
        BillingMode::PayPerRequest => None,
        BillingMode::Provisioned => Some(ProvisionedThroughput {
            read_capacity_units: capacity.read,
            write_capacity_units: capacity.write,
        }),
    }
}

/// De-duplicate attributes by name; the first occurrence wins.
fn merge_attributes<'a>(
    attributes: impl Iterator<Item = &'a Attribute>,
) -> (Vec<AttributeDefinition>, Vec<AttributeConflict>) {
    let mut seen: HashMap<&str, ScalarType> = HashMap::new();
    let mut merged = Vec::new();
    let mut conflicts = Vec::new();

    for attr in attributes {
        match seen.get(attr.name.as_str()) {
            Some(&kept) => {
                if kept != attr.attribute_type {
                    conflicts.push(AttributeConflict {
                        name: attr.name.clone(),
                        kept,
                        ignored: attr.attribute_type,
                    });
                }
            }
            None => {
                seen.insert(attr.name.as_str(), attr.attribute_type);
                merged.push(AttributeDefinition {
                    attribute_name: attr.name.clone(),
                    attribute_type: attr.attribute_type,
                });
            }
        }
    }

    (merged, conflicts)
}
