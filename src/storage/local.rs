//! Filesystem-backed fetcher: `<root>/<bucket>/<key>`.

use super::ObjectFetcher;
use crate::error::FetchError;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a bucket/key pair onto the filesystem.
    ///
    /// Returns `None` when the key would escape the bucket directory.
    fn object_path(&self, bucket: &str, key: &str) -> Option<PathBuf> {
        let relative = Path::new(bucket).join(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        (!escapes).then(|| self.root.join(relative))
    }
}

impl ObjectFetcher for LocalStore {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        let not_found = || FetchError::NotFound {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
        };

        let path = self.object_path(bucket, key).ok_or_else(not_found)?;
        tracing::debug!("Reading object from {}", path.display());

        std::fs::read(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => not_found(),
            ErrorKind::PermissionDenied => FetchError::AccessDenied {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            },
            _ => FetchError::Transient(format!("{}: {err}", path.display())),
        })
    }
}
