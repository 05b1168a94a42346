//! Centralized error handling for the obfuscator.
//!
//! Every failure of a `process` invocation surfaces as exactly one
//! [`ObfuscatorError`]. Callers that only care about the category can match
//! on [`ObfuscatorError::kind`]:
//!
//! ```
//! use pii_obfuscator::error::{ErrorKind, ObfuscatorError};
//!
//! fn status_code(err: &ObfuscatorError) -> u16 {
//!     match err.kind() {
//!         ErrorKind::Fetch => 502,
//!         ErrorKind::DataProcessing | ErrorKind::Config => 500,
//!         _ => 400,
//!     }
//! }
//! ```
//!
//! Storage collaborators report their own failures through [`FetchError`],
//! which converts into [`ObfuscatorError::Fetch`] so `?` works across the
//! fetch boundary.

use crate::obfuscation::format::SUPPORTED_EXTENSIONS;

/// Failure reported by an object-storage collaborator.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The bucket exists but holds no object under the key (or the bucket is unknown).
    #[error("NoSuchKey: The specified key {key} does not exist in the S3 bucket {bucket}.")]
    NotFound { bucket: String, key: String },

    /// The caller's credentials do not allow reading the object.
    #[error("AccessDenied: Not permitted to read s3://{bucket}/{key}.")]
    AccessDenied { bucket: String, key: String },

    /// Anything the collaborator considers retryable (network, throttling, I/O).
    #[error("Transient storage error: {0}")]
    Transient(String),
}

/// Main error type for obfuscation operations.
#[derive(Debug, thiserror::Error)]
pub enum ObfuscatorError {
    /// The request payload is not UTF-8 JSON object text.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A required request key is absent or empty.
    #[error("Invalid input: '{0}' is required and cannot be empty.")]
    MissingField(String),

    /// The location is not an `s3://<bucket>/<key>` URI.
    #[error("Invalid S3 location: {0}")]
    InvalidLocation(String),

    /// The file extension (or format name) is not one we can decode.
    #[error(
        "Unsupported file type: .{extension}. Supported file types are {}.{}",
        SUPPORTED_EXTENSIONS.join(", "),
        location_suffix(.location.as_deref())
    )]
    UnsupportedFormat {
        extension: String,
        location: Option<String>,
    },

    /// Propagated unchanged from the storage collaborator.
    #[error("Failed to fetch object: {0}")]
    Fetch(#[from] FetchError),

    /// A CSV payload without even a header row.
    #[error("No columns to parse from file")]
    NoColumnsToParse,

    /// Masking was asked to run over a table without rows.
    #[error("Input DataFrame is empty. Cannot proceed with processing.")]
    EmptyTable,

    /// Requested mask columns that the table does not have, in request order.
    #[error(
        "The following columns to obfuscate are missing in the DataFrame provided. Missing columns: {}",
        .0.join(", ")
    )]
    MissingColumns(Vec<String>),

    /// Decoder/encoder failures from polars.
    #[error("Data processing error: {0}")]
    DataProcessing(String),

    /// Invalid configuration values.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn location_suffix(location: Option<&str>) -> String {
    location
        .map(|loc| format!(" File path: {loc}"))
        .unwrap_or_default()
}

/// Category of an [`ObfuscatorError`], without its detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedInput,
    MissingField,
    InvalidLocation,
    UnsupportedFormat,
    Fetch,
    NoColumnsToParse,
    EmptyTable,
    MissingColumns,
    DataProcessing,
    Config,
}

impl ObfuscatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedInput(_) => ErrorKind::MalformedInput,
            Self::MissingField(_) => ErrorKind::MissingField,
            Self::InvalidLocation(_) => ErrorKind::InvalidLocation,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::Fetch(_) => ErrorKind::Fetch,
            Self::NoColumnsToParse => ErrorKind::NoColumnsToParse,
            Self::EmptyTable => ErrorKind::EmptyTable,
            Self::MissingColumns(_) => ErrorKind::MissingColumns,
            Self::DataProcessing(_) => ErrorKind::DataProcessing,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// Wraps a polars failure with the operation that produced it.
    pub(crate) fn data(action: &str, err: impl std::fmt::Display) -> Self {
        Self::DataProcessing(format!("{action}: {err}"))
    }
}

impl From<polars::error::PolarsError> for ObfuscatorError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for obfuscation operations.
pub type Result<T> = std::result::Result<T, ObfuscatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_display_joins_names() {
        let err = ObfuscatorError::MissingColumns(vec!["ghost".to_owned(), "phantom".to_owned()]);
        assert_eq!(
            err.to_string(),
            "The following columns to obfuscate are missing in the DataFrame provided. \
             Missing columns: ghost, phantom"
        );
        assert_eq!(err.kind(), ErrorKind::MissingColumns);
    }

    #[test]
    fn test_unsupported_format_mentions_extension_and_path() {
        let err = ObfuscatorError::UnsupportedFormat {
            extension: "txt".to_owned(),
            location: Some("s3://bucket/file.txt".to_owned()),
        };
        let msg = err.to_string();
        assert!(msg.contains(".txt"));
        assert!(msg.contains("csv, json, parquet"));
        assert!(msg.ends_with("File path: s3://bucket/file.txt"));
    }

    #[test]
    fn test_unsupported_format_without_location() {
        let err = ObfuscatorError::UnsupportedFormat {
            extension: "xlsx".to_owned(),
            location: None,
        };
        assert!(!err.to_string().contains("File path"));
    }

    #[test]
    fn test_fetch_error_converts() {
        let err: ObfuscatorError = FetchError::NotFound {
            bucket: "mybucket".to_owned(),
            key: "data.csv".to_owned(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Fetch);
        assert!(err.to_string().contains("NoSuchKey"));
    }
}
