//! Error types.
//!
//! Each concern has its own enum; they all convert into [`Error`] so
//! callers can propagate with `?` and still match on the specific cause.

use thiserror::Error;

/// Boxed underlying cause carried by backend failures.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Vars(#[from] VarsError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from variable set lookups.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum VarsError {
    #[error("variable not found: {0}")]
    KeyNotFound(String),
}

/// Errors from decoding a stored document.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// A line without exactly one `=`. Holds the line verbatim.
    #[error("invalid line in document: {0}")]
    MalformedLine(String),

    #[error("document is not valid UTF-8")]
    InvalidEncoding,
}

/// Errors from a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("environment variables with id '{0}' do not exist")]
    NotFound(String),

    #[error("unable to decode environment variables '{id}': {source}")]
    Decode {
        id: String,
        #[source]
        source: CodecError,
    },

    #[error("{context}: {source}")]
    Backend {
        context: String,
        #[source]
        source: Cause,
    },
}

impl StorageError {
    /// Wrap a transport or service failure with a short description of the
    /// operation that failed.
    pub fn backend(context: impl Into<String>, source: impl Into<Cause>) -> Self {
        Self::Backend {
            context: context.into(),
            source: source.into(),
        }
    }
}

/// Errors building a backend or resolving settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("DigitalOcean Space credentials must be set: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid space name: '{0}'")]
    InvalidSpace(String),

    #[error("invalid region: '{0}'")]
    InvalidRegion(String),

    #[error("invalid endpoint: '{0}' (expected http:// or https:// followed by a host)")]
    InvalidEndpoint(String),

    #[error("invalid credentials: {0} must not be empty")]
    InvalidCredentials(&'static str),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors validating user input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid environment variable: {0} (expected KEY=VALUE)")]
    InvalidAssignment(String),

    #[error("id must not be empty")]
    EmptyId,
}

pub type Result<T> = std::result::Result<T, Error>;
