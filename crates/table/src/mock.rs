use std::collections::{HashSet, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::client::TableApi;
use crate::error::{DynamoError, RESOURCE_IN_USE, RESOURCE_NOT_FOUND};
use crate::request::{CreateTableRequest, DeleteTableRequest};

/// An in-memory stand-in for the service.
///
/// Tracks which tables exist: creating an existing table fails with
/// `ResourceInUseException`, deleting a missing one with
/// `ResourceNotFoundException`. Scripted responses, when queued, take
/// precedence over that bookkeeping. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockTableApi {
    tables: Mutex<HashSet<String>>,
    create_responses: Mutex<VecDeque<Result<(), DynamoError>>>,
    delete_responses: Mutex<VecDeque<Result<(), DynamoError>>>,
    create_requests: Mutex<Vec<CreateTableRequest>>,
    delete_requests: Mutex<Vec<DeleteTableRequest>>,
    delay: Option<Duration>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockTableApi {
    /// A mock with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `table_name` already exists.
    #[must_use]
    pub fn with_table(self, table_name: impl Into<String>) -> Self {
        lock(&self.tables).insert(table_name.into());
        self
    }

    /// Queue the result of the next unanswered `create_table` call.
    #[must_use]
    pub fn with_create_response(self, response: Result<(), DynamoError>) -> Self {
        lock(&self.create_responses).push_back(response);
        self
    }

    /// Queue the result of the next unanswered `delete_table` call.
    #[must_use]
    pub fn with_delete_response(self, response: Result<(), DynamoError>) -> Self {
        lock(&self.delete_responses).push_back(response);
        self
    }

    /// Wait this long before answering each call.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// `true` if the mock currently holds `table_name`.
    pub fn contains(&self, table_name: &str) -> bool {
        lock(&self.tables).contains(table_name)
    }

    /// Every `CreateTable` request received, in order.
    pub fn create_requests(&self) -> Vec<CreateTableRequest> {
        lock(&self.create_requests).clone()
    }

    /// Every `DeleteTable` request received, in order.
    pub fn delete_requests(&self) -> Vec<DeleteTableRequest> {
        lock(&self.delete_requests).clone()
    }

    async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl TableApi for MockTableApi {
    async fn create_table(&self, request: &CreateTableRequest) -> Result<(), DynamoError> {
        lock(&self.create_requests).push(request.clone());
        self.wait().await;

        if let Some(response) = lock(&self.create_responses).pop_front() {
            return response;
        }
        if lock(&self.tables).insert(request.table_name.clone()) {
            Ok(())
        } else {
            Err(DynamoError::service(
                RESOURCE_IN_USE,
                format!("Table already exists: {}", request.table_name),
            ))
        }
    }

    async fn delete_table(&self, request: &DeleteTableRequest) -> Result<(), DynamoError> {
        lock(&self.delete_requests).push(request.clone());
        self.wait().await;

        if let Some(response) = lock(&self.delete_responses).pop_front() {
            return response;
        }
        if lock(&self.tables).remove(&request.table_name) {
            Ok(())
        } else {
            Err(DynamoError::service(
                RESOURCE_NOT_FOUND,
                format!(
                    "Requested resource not found: Table: {} not found",
                    request.table_name
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableDefinition;

    #[tokio::test]
    async fn tracks_table_existence() {
        let mock = MockTableApi::new();
        let create = TableDefinition::new().render("blah");
        let delete = DeleteTableRequest::new("blah");

        mock.create_table(&create).await.unwrap();
        assert!(mock.contains("blah"));
        assert!(mock.create_table(&create).await.unwrap_err().is_resource_in_use());

        mock.delete_table(&delete).await.unwrap();
        assert!(!mock.contains("blah"));
        assert!(mock.delete_table(&delete).await.unwrap_err().is_resource_not_found());
    }

    #[tokio::test]
    async fn scripted_responses_take_precedence() {
        let mock = MockTableApi::new()
            .with_table("blah")
            .with_delete_response(Err(DynamoError::Transport("reset".into())));

        let err = mock
            .delete_table(&DeleteTableRequest::new("blah"))
            .await
            .unwrap_err();
        assert_eq!(err, DynamoError::Transport("reset".into()));
        assert!(mock.contains("blah"));
        assert_eq!(mock.delete_requests().len(), 1);
    }
}
