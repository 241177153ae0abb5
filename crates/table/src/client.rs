use std::sync::Arc;

use async_trait::async_trait;

use crate::error::DynamoError;
use crate::request::{CreateTableRequest, DeleteTableRequest};

/// The two service calls a [`Table`](crate::Table) needs.
///
/// Implementations send exactly one request per call and perform no retries;
/// retry, authentication and transport concerns belong to the underlying
/// client. Errors must carry the service error code unchanged so that the
/// "already exists" / "not found" cases can be recognised.
#[async_trait]
pub trait TableApi: Send + Sync {
    /// Issue a `CreateTable` request.
    async fn create_table(&self, request: &CreateTableRequest) -> Result<(), DynamoError>;

    /// Issue a `DeleteTable` request.
    async fn delete_table(&self, request: &DeleteTableRequest) -> Result<(), DynamoError>;
}

#[async_trait]
impl<T: TableApi + ?Sized> TableApi for Arc<T> {
    async fn create_table(&self, request: &CreateTableRequest) -> Result<(), DynamoError> {
        (**self).create_table(request).await
    }

    async fn delete_table(&self, request: &DeleteTableRequest) -> Result<(), DynamoError> {
        (**self).delete_table(request).await
    }
}
