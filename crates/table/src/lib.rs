//! Declarative `DynamoDB` table definitions with idempotent lifecycle calls.
//!
//! A [`TableDefinition`] is folded from [`TableOption`]s (keys, billing mode,
//! capacity, stream, secondary indexes) and rendered into a
//! [`CreateTableRequest`]. A [`Table`] sends that request through any
//! [`TableApi`] client and treats "already exists" on create and "not found"
//! on delete as success.
//!
//! ```no_run
//! use dynamo_table::{
//!     DynamoConfig, IndexOption, ProjectionType, ScalarType, Table, TableOption, build_client,
//! };
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<(), dynamo_table::DynamoError> {
//! let client = build_client(&DynamoConfig::new("us-east-1")).await;
//! let table = Table::new(client, "users");
//! table
//!     .create_if_not_exists(
//!         &CancellationToken::new(),
//!         "id",
//!         ScalarType::S,
//!         [
//!             TableOption::range_key("created_at", ScalarType::N),
//!             TableOption::global_index(
//!                 "by_email",
//!                 ProjectionType::Include,
//!                 [
//!                     IndexOption::hash_key("email", ScalarType::S),
//!                     IndexOption::attribute("display_name", ScalarType::S),
//!                 ],
//!             ),
//!         ],
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod aws;
pub mod client;
pub mod config;
pub mod error;
pub mod manifest;
pub mod mock;
pub mod render;
pub mod request;
pub mod schema;
pub mod table;
pub mod types;

pub use aws::build_client;
pub use client::TableApi;
pub use config::DynamoConfig;
pub use error::{ConfigError, DynamoError, ParseEnumError, RESOURCE_IN_USE, RESOURCE_NOT_FOUND};
pub use manifest::{IndexManifest, TableManifest};
pub use mock::MockTableApi;
pub use render::AttributeConflict;
pub use request::{CreateTableRequest, DeleteTableRequest};
pub use schema::{Capacity, IndexDefinition, IndexOption, KeySchema, TableDefinition, TableOption};
pub use table::{Outcome, Table};
pub use types::{
    Attribute, BillingMode, DEFAULT_BILLING_MODE, DEFAULT_READ_CAPACITY, DEFAULT_WRITE_CAPACITY,
    KeyType, ProjectionType, ScalarType, StreamViewType,
};
