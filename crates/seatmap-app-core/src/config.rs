// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON config persistence: a byte-level storage port and a typed service
//! over it. Stores never see types; the service never sees paths.

use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use thiserror::Error;

/// Where config bytes live. Keys are logical names such as `"seatmap"`,
/// never paths.
pub trait ConfigStore {
    /// Bytes stored under `key`, or [`ConfigError::NotFound`].
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Replaces whatever is stored under `key`.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Why a config could not be read or written.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Nothing stored under the key.
    #[error("not found")]
    NotFound,
    /// Backing storage failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Stored bytes are not valid JSON for the requested type.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Store-specific failure, e.g. no resolvable config directory.
    #[error("other: {0}")]
    Other(String),
}

/// Typed access to a [`ConfigStore`]: values go in and out as pretty JSON.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Wraps `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps the service.
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Value under `key`. A missing key or an empty blob is `Ok(None)`.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Writes `value` under `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        let data = serde_json::to_vec_pretty(value)?;
        self.store.save_raw(key, &data)
    }
}

/// Volatile store for tests and one-shot tools.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    blobs: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one blob.
    pub fn with_blob(key: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.blobs.borrow_mut().insert(key.into(), data.into());
        store
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        self.blobs
            .borrow()
            .get(key)
            .cloned()
            .ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        self.blobs.borrow_mut().insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Probe {
        gap: f32,
    }

    #[test]
    fn missing_and_empty_keys_load_as_none() {
        let svc = ConfigService::new(MemoryConfigStore::with_blob("empty", Vec::new()));
        assert!(svc.load::<Probe>("absent").unwrap().is_none());
        assert!(svc.load::<Probe>("empty").unwrap().is_none());
    }

    #[test]
    fn saved_values_load_back() {
        let svc = ConfigService::new(MemoryConfigStore::new());
        svc.save("probe", &Probe { gap: 0.25 }).unwrap();
        assert_eq!(svc.load::<Probe>("probe").unwrap(), Some(Probe { gap: 0.25 }));
    }

    #[test]
    fn garbage_is_a_serde_error() {
        let svc = ConfigService::new(MemoryConfigStore::with_blob("probe", b"{not json".to_vec()));
        assert!(matches!(svc.load::<Probe>("probe"), Err(ConfigError::Serde(_))));
    }
}
