//! [`TableApi`] for the AWS SDK `DynamoDB` client.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::{BuildError, DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::types as sdk;
use tracing::debug;

use crate::client::TableApi;
use crate::config::DynamoConfig;
use crate::error::{DynamoError, RESOURCE_IN_USE, RESOURCE_NOT_FOUND};
use crate::request::{
    AttributeDefinition, CreateTableRequest, DeleteTableRequest, GlobalSecondaryIndex,
    KeySchemaElement, LocalSecondaryIndex, Projection, ProvisionedThroughput, StreamSpecification,
};
use crate::types::{BillingMode, KeyType, ProjectionType, ScalarType, StreamViewType};

#[async_trait]
impl TableApi for Client {
    async fn create_table(&self, request: &CreateTableRequest) -> Result<(), DynamoError> {
        let attribute_definitions = request
            .attribute_definitions
            .iter()
            .map(attribute_definition)
            .collect::<Result<Vec<_>, _>>()?;
        let global_indexes = request
            .global_secondary_indexes
            .iter()
            .map(global_index)
            .collect::<Result<Vec<_>, _>>()?;
        let local_indexes = request
            .local_secondary_indexes
            .iter()
            .map(local_index)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(table = %request.table_name, "sending CreateTable");
        self.create_table()
            .table_name(&request.table_name)
            .set_attribute_definitions(non_empty(attribute_definitions))
            .set_key_schema(non_empty(key_schema(&request.key_schema)?))
            .billing_mode(billing_mode(request.billing_mode))
            .set_provisioned_throughput(
                request
                    .provisioned_throughput
                    .map(provisioned_throughput)
                    .transpose()?,
            )
            .set_global_secondary_indexes(non_empty(global_indexes))
            .set_local_secondary_indexes(non_empty(local_indexes))
            .set_stream_specification(
                request
                    .stream_specification
                    .map(stream_specification)
                    .transpose()?,
            )
            .send()
            .await
            .map_err(create_table_error)?;
        Ok(())
    }

    async fn delete_table(&self, request: &DeleteTableRequest) -> Result<(), DynamoError> {
        debug!(table = %request.table_name, "sending DeleteTable");
        self.delete_table()
            .table_name(&request.table_name)
            .send()
            .await
            .map_err(delete_table_error)?;
        Ok(())
    }
}

/// Build an AWS `DynamoDB` [`Client`] from the provided configuration.
///
/// Uses the standard AWS SDK environment credential chain and optionally
/// overrides the endpoint URL for local development.
pub async fn build_client(config: &DynamoConfig) -> Client {
    let mut aws_config =
        aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom DynamoDB endpoint");
        aws_config = aws_config.endpoint_url(endpoint);
    }

    let sdk_config = aws_config.load().await;
    Client::new(&sdk_config)
}

impl From<BuildError> for DynamoError {
    fn from(err: BuildError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

fn create_table_error(err: SdkError<CreateTableError, HttpResponse>) -> DynamoError {
    match err {
        SdkError::ServiceError(context) => classify_create_error(context.err()),
        other => transport_error(&other),
    }
}

fn delete_table_error(err: SdkError<DeleteTableError, HttpResponse>) -> DynamoError {
    match err {
        SdkError::ServiceError(context) => classify_delete_error(context.err()),
        other => transport_error(&other),
    }
}

fn classify_create_error(err: &CreateTableError) -> DynamoError {
    let known = err.is_resource_in_use_exception().then_some(RESOURCE_IN_USE);
    service_error(err, known)
}

fn classify_delete_error(err: &DeleteTableError) -> DynamoError {
    let known = err
        .is_resource_not_found_exception()
        .then_some(RESOURCE_NOT_FOUND);
    service_error(err, known)
}

fn service_error<E: ProvideErrorMetadata>(err: &E, known_code: Option<&str>) -> DynamoError {
    DynamoError::service(
        known_code.or_else(|| err.code()).unwrap_or("Unknown"),
        err.message().unwrap_or_default(),
    )
}

fn transport_error<E, R>(err: &SdkError<E, R>) -> DynamoError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    DynamoError::Transport(DisplayErrorContext(err).to_string())
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn scalar_type(value: ScalarType) -> sdk::ScalarAttributeType {
    match value {
        ScalarType::S => sdk::ScalarAttributeType::S,
        ScalarType::N => sdk::ScalarAttributeType::N,
        ScalarType::B => sdk::ScalarAttributeType::B,
    }
}

fn key_type(value: KeyType) -> sdk::KeyType {
    match value {
        KeyType::Hash => sdk::KeyType::Hash,
        KeyType::Range => sdk::KeyType::Range,
    }
}

fn billing_mode(value: BillingMode) -> sdk::BillingMode {
    match value {
        BillingMode::Provisioned => sdk::BillingMode::Provisioned,
        BillingMode::PayPerRequest => sdk::BillingMode::PayPerRequest,
    }
}

fn projection_type(value: ProjectionType) -> sdk::ProjectionType {
    match value {
        ProjectionType::KeysOnly => sdk::ProjectionType::KeysOnly,
        ProjectionType::All => sdk::ProjectionType::All,
        ProjectionType::Include => sdk::ProjectionType::Include,
    }
}

fn stream_view_type(value: StreamViewType) -> sdk::StreamViewType {
    match value {
        StreamViewType::KeysOnly => sdk::StreamViewType::KeysOnly,
        StreamViewType::NewImage => sdk::StreamViewType::NewImage,
        StreamViewType::OldImage => sdk::StreamViewType::OldImage,
        StreamViewType::NewAndOldImages => sdk::StreamViewType::NewAndOldImages,
    }
}

fn attribute_definition(def: &AttributeDefinition) -> Result<sdk::AttributeDefinition, BuildError> {
    sdk::AttributeDefinition::builder()
        .attribute_name(&def.attribute_name)
        .attribute_type(scalar_type(def.attribute_type))
        .build()
}

fn key_schema(elements: &[KeySchemaElement]) -> Result<Vec<sdk::KeySchemaElement>, BuildError> {
    elements
        .iter()
        .map(|element| {
            sdk::KeySchemaElement::builder()
                .attribute_name(&element.attribute_name)
                .key_type(key_type(element.key_type))
                .build()
        })
        .collect()
}

fn provisioned_throughput(
    throughput: ProvisionedThroughput,
) -> Result<sdk::ProvisionedThroughput, BuildError> {
    sdk::ProvisionedThroughput::builder()
        .read_capacity_units(throughput.read_capacity_units)
        .write_capacity_units(throughput.write_capacity_units)
        .build()
}

fn projection(value: &Projection) -> sdk::Projection {
    sdk::Projection::builder()
        .projection_type(projection_type(value.projection_type))
        .set_non_key_attributes(value.non_key_attributes.clone())
        .build()
}

fn global_index(index: &GlobalSecondaryIndex) -> Result<sdk::GlobalSecondaryIndex, BuildError> {
    sdk::GlobalSecondaryIndex::builder()
        .index_name(&index.index_name)
        .set_key_schema(Some(key_schema(&index.key_schema)?))
        .projection(projection(&index.projection))
        .set_provisioned_throughput(
            index
                .provisioned_throughput
                .map(provisioned_throughput)
                .transpose()?,
        )
        .build()
}

fn local_index(index: &LocalSecondaryIndex) -> Result<sdk::LocalSecondaryIndex, BuildError> {
    sdk::LocalSecondaryIndex::builder()
        .index_name(&index.index_name)
        .set_key_schema(Some(key_schema(&index.key_schema)?))
        .projection(projection(&index.projection))
        .build()
}

fn stream_specification(
    spec: StreamSpecification,
) -> Result<sdk::StreamSpecification, BuildError> {
    sdk::StreamSpecification::builder()
        .stream_enabled(spec.stream_enabled)
        .stream_view_type(stream_view_type(spec.stream_view_type))
        .build()
}
