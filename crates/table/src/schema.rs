//! Declarative table and index definitions.
//!
//! A [`TableDefinition`] is built by folding a sequence of [`TableOption`]s
//! over the defaults: scalar fields take the last value supplied, index
//! declarations accumulate. Secondary indexes are described by their own
//! [`IndexDefinition`], folded from [`IndexOption`]s against the same
//! defaults. Nothing is resolved against the billing mode until the
//! definition is rendered.

use crate::types::{
    Attribute, BillingMode, DEFAULT_BILLING_MODE, DEFAULT_READ_CAPACITY, DEFAULT_WRITE_CAPACITY,
    ProjectionType, ScalarType, StreamViewType,
};

/// Hash and range key of a table or index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySchema {
    pub hash_key: Option<Attribute>,
    pub range_key: Option<Attribute>,
}

impl KeySchema {
    /// The declared key attributes, hash first.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.hash_key.iter().chain(self.range_key.iter())
    }
}

/// Read and write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub read: i64,
    pub write: i64,
}

impl Capacity {
    /// Create a capacity pair.
    pub const fn new(read: i64, write: i64) -> Self {
        Self { read, write }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::new(DEFAULT_READ_CAPACITY, DEFAULT_WRITE_CAPACITY)
    }
}

/// A single declaration applied to an [`IndexDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexOption {
    /// A non-key attribute projected into the index.
    Attribute(Attribute),
    HashKey(Attribute),
    RangeKey(Attribute),
    ReadCapacity(i64),
    WriteCapacity(i64),
}

impl IndexOption {
    pub fn attribute(name: impl Into<String>, attribute_type: ScalarType) -> Self {
        Self::Attribute(Attribute::new(name, attribute_type))
    }

    pub fn hash_key(name: impl Into<String>, attribute_type: ScalarType) -> Self {
        Self::HashKey(Attribute::new(name, attribute_type))
    }

    pub fn range_key(name: impl Into<String>, attribute_type: ScalarType) -> Self {
        Self::RangeKey(Attribute::new(name, attribute_type))
    }
}

/// A single declaration applied to a [`TableDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    HashKey(Attribute),
    RangeKey(Attribute),
    BillingMode(BillingMode),
    ReadCapacity(i64),
    WriteCapacity(i64),
    /// Enable the table stream with the given view type.
    Stream(StreamViewType),
    GlobalIndex(IndexDefinition),
    LocalIndex(IndexDefinition),
}

impl TableOption {
    pub fn hash_key(name: impl Into<String>, attribute_type: ScalarType) -> Self {
        Self::HashKey(Attribute::new(name, attribute_type))
    }

    pub fn range_key(name: impl Into<String>, attribute_type: ScalarType) -> Self {
        Self::RangeKey(Attribute::new(name, attribute_type))
    }

    /// Declare a global secondary index from its own option list.
    pub fn global_index(
        name: impl Into<String>,
        projection_type: ProjectionType,
        options: impl IntoIterator<Item = IndexOption>,
    ) -> Self {
        Self::GlobalIndex(IndexDefinition::from_options(name, projection_type, options))
    }

    /// Declare a local secondary index from its own option list.
    pub fn local_index(
        name: impl Into<String>,
        projection_type: ProjectionType,
        options: impl IntoIterator<Item = IndexOption>,
    ) -> Self {
        Self::LocalIndex(IndexDefinition::from_options(name, projection_type, options))
    }
}

/// A secondary index declaration, global or local.
///
/// `capacity` is only rendered for global indexes on provisioned tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDefinition {
    pub name: String,
    pub projection_type: ProjectionType,
    pub keys: KeySchema,
    /// Non-key attributes projected into the index.
    pub attributes: Vec<Attribute>,
    pub capacity: Capacity,
}

impl IndexDefinition {
    /// Create an index with default capacity and no keys or projected attributes.
    pub fn new(name: impl Into<String>, projection_type: ProjectionType) -> Self {
        Self {
            name: name.into(),
            projection_type,
            keys: KeySchema::default(),
            attributes: Vec::new(),
            capacity: Capacity::default(),
        }
    }

    /// Create an index and fold `options` into it in order.
    pub fn from_options(
        name: impl Into<String>,
        projection_type: ProjectionType,
        options: impl IntoIterator<Item = IndexOption>,
    ) -> Self {
        options
            .into_iter()
            .fold(Self::new(name, projection_type), |mut index, option| {
                index.apply(option);
                index
            })
    }

    /// Apply a single option.
    pub fn apply(&mut self, option: IndexOption) {
        match option {
            IndexOption::Attribute(attr) => self.attributes.push(attr),
            IndexOption::HashKey(attr) => self.keys.hash_key = Some(attr),
            IndexOption::RangeKey(attr) => self.keys.range_key = Some(attr),
            IndexOption::ReadCapacity(units) => self.capacity.read = units,
            IndexOption::WriteCapacity(units) => self.capacity.write = units,
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, attribute_type: ScalarType) -> Self {
        self.apply(IndexOption::attribute(name, attribute_type));
        self
    }

    #[must_use]
    pub fn with_hash_key(mut self, name: impl Into<String>, attribute_type: ScalarType) -> Self {
        self.apply(IndexOption::hash_key(name, attribute_type));
        self
    }

    #[must_use]
    pub fn with_range_key(mut self, name: impl Into<String>, attribute_type: ScalarType) -> Self {
        self.apply(IndexOption::range_key(name, attribute_type));
        self
    }

    #[must_use]
    pub fn with_read_capacity(mut self, units: i64) -> Self {
        self.apply(IndexOption::ReadCapacity(units));
        self
    }

    #[must_use]
    pub fn with_write_capacity(mut self, units: i64) -> Self {
        self.apply(IndexOption::WriteCapacity(units));
        self
    }

    /// Every attribute the index references: keys first, then projections.
    pub fn referenced_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.keys.attributes().chain(self.attributes.iter())
    }
}

/// The normalized configuration of one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub billing_mode: BillingMode,
    pub keys: KeySchema,
    pub capacity: Capacity,
    pub global_indexes: Vec<IndexDefinition>,
    pub local_indexes: Vec<IndexDefinition>,
    pub stream_view_type: Option<StreamViewType>,
}

impl Default for TableDefinition {
    fn default() -> Self {
        Self {
            billing_mode: DEFAULT_BILLING_MODE,
            keys: KeySchema::default(),
            capacity: Capacity::default(),
            global_indexes: Vec::new(),
            local_indexes: Vec::new(),
            stream_view_type: None,
        }
    }
}

impl TableDefinition {
    /// Create a definition holding only the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `options` over the defaults, in order.
    pub fn from_options(options: impl IntoIterator<Item = TableOption>) -> Self {
        options.into_iter().fold(Self::new(), |mut table, option| {
            table.apply(option);
            table
        })
    }

    /// Apply a single option. Scalars are overwritten, indexes appended.
    pub fn apply(&mut self, option: TableOption) {
        match option {
            TableOption::HashKey(attr) => self.keys.hash_key = Some(attr),
            TableOption::RangeKey(attr) => self.keys.range_key = Some(attr),
            TableOption::BillingMode(mode) => self.billing_mode = mode,
            TableOption::ReadCapacity(units) => self.capacity.read = units,
            TableOption::WriteCapacity(units) => self.capacity.write = units,
            TableOption::Stream(view) => self.stream_view_type = Some(view),
            TableOption::GlobalIndex(index) => self.global_indexes.push(index),
            TableOption::LocalIndex(index) => self.local_indexes.push(index),
        }
    }

    #[must_use]
    pub fn with_hash_key(mut self, name: impl Into<String>, attribute_type: ScalarType) -> Self {
        self.apply(TableOption::hash_key(name, attribute_type));
        self
    }

    #[must_use]
    pub fn with_range_key(mut self, name: impl Into<String>, attribute_type: ScalarType) -> Self {
        self.apply(TableOption::range_key(name, attribute_type));
        self
    }

    #[must_use]
    pub fn with_billing_mode(mut self, mode: BillingMode) -> Self {
        self.apply(TableOption::BillingMode(mode));
        self
    }

    #[must_use]
    pub fn with_read_capacity(mut self, units: i64) -> Self {
        self.apply(TableOption::ReadCapacity(units));
        self
    }

    #[must_use]
    pub fn with_write_capacity(mut self, units: i64) -> Self {
        self.apply(TableOption::WriteCapacity(units));
        self
    }

    #[must_use]
    pub fn with_stream(mut self, view: StreamViewType) -> Self {
        self.apply(TableOption::Stream(view));
        self
    }

    #[must_use]
    pub fn with_global_index(mut self, index: IndexDefinition) -> Self {
        self.apply(TableOption::GlobalIndex(index));
        self
    }

    #[must_use]
    pub fn with_local_index(mut self, index: IndexDefinition) -> Self {
        self.apply(TableOption::LocalIndex(index));
        self
    }

    /// Every attribute referenced by the table and its indexes, in merge
    /// order: table keys, global indexes, then local indexes.
    pub fn referenced_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.keys.attributes().chain(
            self.global_indexes
                .iter()
                .chain(self.local_indexes.iter())
                .flat_map(IndexDefinition::referenced_attributes),
        )
    }
}
