//! In-process object store.

use super::ObjectFetcher;
use crate::error::FetchError;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: HashMap<(String, String), Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores (or replaces) an object.
    pub fn put(&mut self, bucket: impl Into<String>, key: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.objects.insert((bucket.into(), key.into()), body.into());
    }

    /// Builder-style [`MemoryStore::put`].
    #[must_use]
    pub fn with_object(
        mut self,
        bucket: impl Into<String>,
        key: impl Into<String>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        self.put(bucket, key, body);
        self
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectFetcher for MemoryStore {
    fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, FetchError> {
        self.objects
            .get(&(bucket.to_owned(), key.to_owned()))
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
            })
    }
}
