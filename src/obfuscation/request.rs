//! Parsing and validation of the obfuscation request payload.
//!
//! A request is a JSON object naming the file and the columns to mask:
//!
//! ```json
//! {
//!     "file_to_obfuscate": "s3://my_ingestion_bucket/new_data/file1.csv",
//!     "pii_fields": ["name", "email_address"]
//! }
//! ```

use super::format::SupportedFormat;
use crate::error::{ObfuscatorError, Result};
use crate::storage::{LOCATION_FIELD, S3_SCHEME, StorageUri};
use serde_json::Value;

/// Key holding the list of columns to mask.
pub const COLUMNS_FIELD: &str = "pii_fields";

/// A validated request: where the file lives, how it is encoded, what to mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObfuscationRequest {
    pub location: StorageUri,
    pub format: SupportedFormat,
    /// Unique column names in the order the caller supplied them.
    pub columns: Vec<String>,
}

impl ObfuscationRequest {
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<Self> {
        let text = std::str::from_utf8(raw.as_ref()).map_err(|_| {
            ObfuscatorError::MalformedInput("Input must be UTF-8 encoded JSON text.".to_owned())
        })?;
        if text.trim().is_empty() {
            return Err(ObfuscatorError::MalformedInput(
                "Input must be a JSON string and cannot be empty.".to_owned(),
            ));
        }

        let payload: Value = serde_json::from_str(text).map_err(|_| {
            ObfuscatorError::MalformedInput("Input is not a valid JSON string as expected.".to_owned())
        })?;
        let Value::Object(fields) = payload else {
            return Err(ObfuscatorError::MalformedInput(
                "Input must be a JSON object.".to_owned(),
            ));
        };

        let location = required_string(fields.get(LOCATION_FIELD), LOCATION_FIELD)?;
        let columns = required_columns(fields.get(COLUMNS_FIELD))?;

        if !location.starts_with(S3_SCHEME) {
            return Err(ObfuscatorError::InvalidLocation(format!(
                "'{LOCATION_FIELD}' must start with '{S3_SCHEME}', got '{location}'."
            )));
        }
        let uri = StorageUri::parse(location)?;
        let format = SupportedFormat::from_path(location)?;

        Ok(Self {
            location: uri,
            format,
            columns,
        })
    }
}

fn required_string<'a>(value: Option<&'a Value>, field: &str) -> Result<&'a str> {
    match value {
        None | Some(Value::Null) => Err(ObfuscatorError::MissingField(field.to_owned())),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(ObfuscatorError::MissingField(field.to_owned()))
        }
        Some(Value::String(s)) => Ok(s.trim()),
        Some(other) => Err(ObfuscatorError::MalformedInput(format!(
            "'{field}' must be a string, got {other}."
        ))),
    }
}

fn required_columns(value: Option<&Value>) -> Result<Vec<String>> {
    let items = match value {
        None | Some(Value::Null) => return Err(ObfuscatorError::MissingField(COLUMNS_FIELD.to_owned())),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ObfuscatorError::MalformedInput(format!(
                "'{COLUMNS_FIELD}' must be a list of column names, got {other}."
            )));
        }
    };
    if items.is_empty() {
        return Err(ObfuscatorError::MissingField(COLUMNS_FIELD.to_owned()));
    }

    let mut columns: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let Value::String(name) = item else {
            return Err(ObfuscatorError::MalformedInput(format!(
                "'{COLUMNS_FIELD}' entries must be strings, got {item}."
            )));
        };
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }
    Ok(columns)
}
