//! Error types for the MCP toolkit benchmark.
//!
//! A single error hierarchy is shared by the token reporter and the workspace
//! seeder. Every variant carries the context an operator needs to act on it
//! (paths, labels, encodings) so that the CLI can print one diagnostic line.
//!
//! # Examples
//!
//! ```
//! use mcp_bench_core::{Error, Result};
//!
//! fn require_key(key: Option<&str>) -> Result<&str> {
//!     key.ok_or_else(|| Error::ConfigError {
//!         message: "ATTIO_API_KEY is not set".to_string(),
//!     })
//! }
//!
//! let err = require_key(None).unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the benchmark tooling.
#[derive(Error, Debug)]
pub enum Error {
    /// Remote API connection failed.
    ///
    /// Raised by the pre-flight connectivity check when the CRM API cannot be
    /// reached or rejects the credential.
    #[error("API connection failed: {endpoint}")]
    ConnectionFailed {
        /// Endpoint or base URL that could not be reached
        endpoint: String,
        /// Underlying error cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Resource not found error.
    ///
    /// Occurs when an input directory or file does not exist.
    #[error("Resource not found: {resource}")]
    ResourceNotFound {
        /// Identifier of the missing resource
        resource: String,
    },

    /// Configuration error.
    ///
    /// Raised when a required environment variable is missing or a
    /// configuration value cannot be parsed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Tokenizer could not be loaded.
    #[error("Tokenizer unavailable for encoding '{encoding}'")]
    TokenizerUnavailable {
        /// Encoding name that failed to load
        encoding: String,
        /// Underlying loader error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A scan finished without producing a single row.
    #[error("No JSON files found under {}", root.display())]
    EmptyResultSet {
        /// Root directory that was scanned
        root: PathBuf,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Description of the serialization failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// CSV export or import failed.
    #[error("CSV export failed for {}: {message}", path.display())]
    ExportError {
        /// Destination or source path
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// Filesystem error with path context.
    #[error("I/O error at {}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Validation error.
    ///
    /// Raised when a dataset does not satisfy its coverage thresholds or
    /// contains inconsistent references.
    #[error("Validation error in {field}: {reason}")]
    ValidationError {
        /// The field or check that failed validation
        field: String,
        /// Detailed reason for the validation failure
        reason: String,
    },
}

impl Error {
    /// Returns `true` if this is a connection error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_core::Error;
    ///
    /// let err = Error::ConnectionFailed {
    ///     endpoint: "https://api.attio.com/v2/self".to_string(),
    ///     source: "connection refused".into(),
    /// };
    /// assert!(err.is_connection_error());
    /// ```
    #[must_use]
    pub const fn is_connection_error(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. })
    }

    /// Returns `true` if this is a resource not found error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_core::Error;
    ///
    /// let err = Error::ResourceNotFound {
    ///     resource: "data/raw".to_string(),
    /// };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if the tokenizer could not be loaded.
    #[must_use]
    pub const fn is_tokenizer_error(&self) -> bool {
        matches!(self, Self::TokenizerUnavailable { .. })
    }

    /// Returns `true` if a scan produced no rows.
    #[must_use]
    pub const fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResultSet { .. })
    }

    /// Returns `true` if this is a validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_core::Error;
    ///
    /// let err = Error::ValidationError {
    ///     field: "02 Nurture deals".to_string(),
    ///     reason: "found 3, need at least 20".to_string(),
    /// };
    /// assert!(err.is_validation_error());
    /// ```
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// Returns `true` if the error stems from bad input rather than the
    /// environment (invalid arguments or failed validation).
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument(_) | Self::ValidationError { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

/// Result type alias for benchmark operations.
pub type Result<T> = std::result::Result<T, Error>;
