//! Object-storage boundary.
//!
//! The obfuscator never talks to a storage service directly. It is handed an
//! [`ObjectFetcher`] whose single capability is "give me the bytes of this
//! object". Credentials, regions and retries all live behind that trait.
//!
//! Two fetchers ship with the crate:
//! - [`LocalStore`]: buckets are directories under a root path.
//! - [`MemoryStore`]: an in-process map, handy for tests and dry runs.

pub mod local;
pub mod memory;

pub use local::LocalStore;
pub use memory::MemoryStore;

use crate::error::{FetchError, ObfuscatorError, Result};
use std::fmt;

/// Scheme every location must carry.
pub const S3_SCHEME: &str = "s3://";

/// Key under which a wrapped location carries its URI.
pub const LOCATION_FIELD: &str = "file_to_obfuscate";

/// Capability to read a whole object from a bucket.
pub trait ObjectFetcher {
    fn fetch(&self, bucket: &str, key: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

impl<T: ObjectFetcher + ?Sized> ObjectFetcher for &T {
    fn fetch(&self, bucket: &str, key: &str) -> std::result::Result<Vec<u8>, FetchError> {
        (**self).fetch(bucket, key)
    }
}

impl<T: ObjectFetcher + ?Sized> ObjectFetcher for Box<T> {
    fn fetch(&self, bucket: &str, key: &str) -> std::result::Result<Vec<u8>, FetchError> {
        (**self).fetch(bucket, key)
    }
}

/// A parsed `s3://<bucket>/<key>` location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageUri {
    bucket: String,
    key: String,
}

impl StorageUri {
    /// Parses a plain `s3://` URI, splitting bucket and key on the first `/`.
    pub fn parse(uri: &str) -> Result<Self> {
        let uri = uri.trim();
        let Some(rest) = uri.strip_prefix(S3_SCHEME) else {
            return Err(ObfuscatorError::InvalidLocation(format!(
                "Expected an S3 URI starting with '{S3_SCHEME}', got '{uri}'."
            )));
        };

        match rest.split_once('/') {
            Some((bucket, key)) if !bucket.is_empty() && !key.is_empty() => Ok(Self {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            }),
            _ => Err(ObfuscatorError::InvalidLocation(format!(
                "Expected '{S3_SCHEME}<bucket>/<key>', got '{uri}'."
            ))),
        }
    }

    /// Accepts either a plain URI or the wrapped `{"file_to_obfuscate": "s3://..."}` form.
    pub fn resolve(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if !trimmed.starts_with('{') {
            return Self::parse(trimmed);
        }

        let unwrapped = serde_json::from_str::<serde_json::Value>(trimmed)
            .ok()
            .and_then(|value| {
                value
                    .get(LOCATION_FIELD)
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_owned)
            })
            .ok_or_else(|| {
                ObfuscatorError::InvalidLocation(format!(
                    "Expected a JSON object with a '{LOCATION_FIELD}' string starting with '{S3_SCHEME}'."
                ))
            })?;

        Self::parse(&unwrapped)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fetch_with(&self, fetcher: &impl ObjectFetcher) -> Result<Vec<u8>> {
        Ok(fetcher.fetch(&self.bucket, &self.key)?)
    }
}

impl fmt::Display for StorageUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{S3_SCHEME}{}/{}", self.bucket, self.key)
    }
}
