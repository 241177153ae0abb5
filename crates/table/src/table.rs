use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::client::TableApi;
use crate::error::DynamoError;
use crate::request::DeleteTableRequest;
use crate::schema::{TableDefinition, TableOption};
use crate::types::ScalarType;

/// What an idempotent lifecycle call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Created,
    /// The table was already there; nothing was changed.
    AlreadyExists,
    Deleted,
    /// The table was already gone; nothing was changed.
    NotFound,
}

impl Outcome {
    /// `true` if the call changed the service state.
    pub fn changed(self) -> bool {
        matches!(self, Self::Created | Self::Deleted)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AlreadyExists => "already_exists",
            Self::Deleted => "deleted",
            Self::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to one named table.
///
/// Both lifecycle calls converge: repeating them leaves the table in the
/// same state and reports success. Any error other than the expected
/// "already exists" / "not found" is returned exactly as the client produced
/// it. Each call issues a single request; there are no retries.
#[derive(Debug, Clone)]
pub struct Table<C> {
    client: C,
    table_name: String,
}

impl<C: TableApi> Table<C> {
    /// Bind `client` to `table_name`.
    pub fn new(client: C, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.table_name
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create the table unless it already exists.
    ///
    /// The hash key is applied first, so an explicit `TableOption::HashKey`
    /// in `options` overrides it.
    ///
    /// # Errors
    ///
    /// Returns [`DynamoError::Cancelled`] if `cancel` fires before the
    /// service answers, or the client's error for anything other than
    /// `ResourceInUseException`.
    #[instrument(skip_all, fields(table = %self.table_name))]
    pub async fn create_if_not_exists(
        &self,
        cancel: &CancellationToken,
        hash_key_name: impl Into<String>,
        hash_key_type: ScalarType,
        options: impl IntoIterator<Item = TableOption>,
    ) -> Result<Outcome, DynamoError> {
        let definition = TableDefinition::from_options(
            std::iter::once(TableOption::hash_key(hash_key_name, hash_key_type)).chain(options),
        );
        self.create_definition_if_not_exists(cancel, &definition)
            .await
    }

    /// Create the table from a prepared definition unless it already exists.
    #[instrument(skip_all, fields(table = %self.table_name))]
    pub async fn create_definition_if_not_exists(
        &self,
        cancel: &CancellationToken,
        definition: &TableDefinition,
    ) -> Result<Outcome, DynamoError> {
        let request = definition.render(&self.table_name);
        debug!(
            billing_mode = %request.billing_mode,
            attributes = request.attribute_definitions.len(),
            global_indexes = request.global_secondary_indexes.len(),
            local_indexes = request.local_secondary_indexes.len(),
            "rendered create request"
        );

        match cancellable(cancel, self.client.create_table(&request)).await {
            Ok(()) => {
                info!("table created");
                Ok(Outcome::Created)
            }
            Err(err) if err.is_resource_in_use() => {
                info!("table already exists");
                Ok(Outcome::AlreadyExists)
            }
            Err(err) => Err(err),
        }
    }

    /// Delete the table if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`DynamoError::Cancelled`] if `cancel` fires before the
    /// service answers, or the client's error for anything other than
    /// `ResourceNotFoundException`.
    #[instrument(skip_all, fields(table = %self.table_name))]
    pub async fn delete_if_exists(&self, cancel: &CancellationToken) -> Result<Outcome, DynamoError> {
        let request = DeleteTableRequest::new(self.table_name.clone());

        match cancellable(cancel, self.client.delete_table(&request)).await {
            Ok(()) => {
                info!("table deleted");
                Ok(Outcome::Deleted)
            }
            Err(err) if err.is_resource_not_found() => {
                info!("table does not exist");
                Ok(Outcome::NotFound)
            }
            Err(err) => Err(err),
        }
    }
}

/// Race `request` against `cancel`. The request is dropped if cancelled.
async fn cancellable<T>(
    cancel: &CancellationToken,
    request: impl Future<Output = Result<T, DynamoError>>,
) -> Result<T, DynamoError> {
    if cancel.is_cancelled() {
        return Err(DynamoError::Cancelled);
    }
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(DynamoError::Cancelled),
        result = request => result,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::mock::MockTableApi;
    use crate::request::ProvisionedThroughput;
    use crate::schema::{IndexOption, TableOption};
    use crate::types::{BillingMode, KeyType, ProjectionType};

    const TABLE_NAME: &str = "blah";
    const HASH_KEY: &str = "id";

    fn table(mock: MockTableApi) -> Table<Arc<MockTableApi>> {
        Table::new(Arc::new(mock), TABLE_NAME)
    }

    #[tokio::test]
    async fn create_ok() {
        let table = table(MockTableApi::new());
        let outcome = table
            .create_if_not_exists(&CancellationToken::new(), HASH_KEY, ScalarType::S, [])
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::Created);
        assert!(table.client().contains(TABLE_NAME));
    }

    #[tokio::test]
    async fn create_prepends_hash_key() {
        let table = table(MockTableApi::new());
        table
            .create_if_not_exists(
                &CancellationToken::new(),
                HASH_KEY,
                ScalarType::S,
                [
                    TableOption::range_key("range", ScalarType::N),
                    TableOption::global_index(
                        "index",
                        ProjectionType::Include,
                        [IndexOption::attribute("hello", ScalarType::S)],
                    ),
                ],
            )
            .await
            .unwrap();

        let requests = table.client().create_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.table_name, TABLE_NAME);
        assert_eq!(request.key_schema[0].attribute_name, HASH_KEY);
        assert_eq!(request.key_schema[0].key_type, KeyType::Hash);
        assert_eq!(request.key_schema[1].key_type, KeyType::Range);
        assert_eq!(request.billing_mode, BillingMode::Provisioned);
        assert_eq!(
            request.provisioned_throughput,
            Some(ProvisionedThroughput {
                read_capacity_units: 3,
                write_capacity_units: 3,
            })
        );
        let names: Vec<_> = request
            .attribute_definitions
            .iter()
            .map(|a| a.attribute_name.as_str())
            .collect();
        assert_eq!(names, [HASH_KEY, "range", "hello"]);
    }

    #[tokio::test]
    async fn create_is_idempotent() {
        let table = table(MockTableApi::new());
        let cancel = CancellationToken::new();

        let first = table
            .create_if_not_exists(&cancel, HASH_KEY, ScalarType::S, [])
            .await
            .unwrap();
        let second = table
            .create_if_not_exists(&cancel, HASH_KEY, ScalarType::S, [])
            .await
            .unwrap();

        assert_eq!(first, Outcome::Created);
        assert_eq!(second, Outcome::AlreadyExists);
        assert!(!second.changed());
        assert_eq!(table.client().create_requests().len(), 2);
    }

    #[tokio::test]
    async fn create_table_already_exists() {
        let table = table(MockTableApi::new().with_create_response(Err(DynamoError::service(
            crate::error::RESOURCE_IN_USE,
            "boom",
        ))));
        let outcome = table
            .create_if_not_exists(&CancellationToken::new(), HASH_KEY, ScalarType::S, [])
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::AlreadyExists);
    }

    #[tokio::test]
    async fn create_passes_other_errors_through() {
        let failure = DynamoError::service("LimitExceededException", "Subscriber limit exceeded");
        let table = table(MockTableApi::new().with_create_response(Err(failure.clone())));
        let err = table
            .create_if_not_exists(&CancellationToken::new(), HASH_KEY, ScalarType::S, [])
            .await
            .unwrap_err();
        assert_eq!(err, failure);
    }

    #[tokio::test]
    async fn create_does_not_swallow_not_found() {
        let failure = DynamoError::service(crate::error::RESOURCE_NOT_FOUND, "boom");
        let table = table(MockTableApi::new().with_create_response(Err(failure.clone())));
        let err = table
            .create_if_not_exists(&CancellationToken::new(), HASH_KEY, ScalarType::S, [])
            .await
            .unwrap_err();
        assert_eq!(err, failure);
    }

    #[tokio::test]
    async fn delete_ok() {
        let table = table(MockTableApi::new().with_table(TABLE_NAME));
        let outcome = table.delete_if_exists(&CancellationToken::new()).await.unwrap();
        assert_eq!(outcome, Outcome::Deleted);
        assert!(outcome.changed());
        assert_eq!(
            table.client().delete_requests(),
            vec![DeleteTableRequest::new(TABLE_NAME)]
        );
    }

    #[tokio::test]
    async fn delete_missing_table() {
        let table = table(MockTableApi::new());
        let outcome = table.delete_if_exists(&CancellationToken::new()).await.unwrap();
        assert_eq!(outcome, Outcome::NotFound);
    }

    #[tokio::test]
    async fn delete_passes_other_errors_through() {
        let failure = DynamoError::Transport("dispatch failure: connection refused".into());
        let table = table(
            MockTableApi::new()
                .with_table(TABLE_NAME)
                .with_delete_response(Err(failure.clone())),
        );
        let err = table
            .delete_if_exists(&CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, failure);
    }

    #[tokio::test]
    async fn already_cancelled_sends_nothing() {
        let table = table(MockTableApi::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = table
            .create_if_not_exists(&cancel, HASH_KEY, ScalarType::S, [])
            .await
            .unwrap_err();
        assert_eq!(err, DynamoError::Cancelled);
        assert!(table.client().create_requests().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_aborts_in_flight_request() {
        let table = table(MockTableApi::new().with_delay(Duration::from_secs(60)));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            trigger.cancel();
        });

        let err = table
            .create_if_not_exists(&cancel, HASH_KEY, ScalarType::S, [])
            .await
            .unwrap_err();
        assert_eq!(err, DynamoError::Cancelled);
        assert_eq!(table.client().create_requests().len(), 1);
        assert!(!table.client().contains(TABLE_NAME));
    }
}
