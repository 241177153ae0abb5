use thiserror::Error;

/// Service error code returned by `CreateTable` when the table already exists.
pub const RESOURCE_IN_USE: &str = "ResourceInUseException";

/// Service error code returned by `DeleteTable` when the table does not exist.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// Errors from table lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DynamoError {
    /// The service rejected the request. Code and message are passed through
    /// exactly as the service reported them.
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The request never produced a service response (dispatch failure,
    /// timeout, malformed response).
    #[error("transport error: {0}")]
    Transport(String),

    /// The request could not be assembled into a valid SDK shape.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The caller cancelled the operation before the service answered.
    #[error("operation cancelled")]
    Cancelled,
}

impl DynamoError {
    /// Create a service error from a code and message.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// The service error code, if the service produced one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            _ => None,
        }
    }

    /// `true` if the service reported that the table already exists.
    pub fn is_resource_in_use(&self) -> bool {
        self.code() == Some(RESOURCE_IN_USE)
    }

    /// `true` if the service reported that the table does not exist.
    pub fn is_resource_not_found(&self) -> bool {
        self.code() == Some(RESOURCE_NOT_FOUND)
    }
}

/// Errors from loading a table manifest.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid manifest: {0}")]
    Invalid(String),
}

/// An unrecognised string for one of the service enums.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}
