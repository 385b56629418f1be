//! Sustain Store Layer
//!
//! Document store implementations of the `DocumentStore` trait from
//! `sustain-domain`.
//!
//! # Architecture
//!
//! The ingestion pipeline only needs a narrow write interface: check, drop and
//! declare collections, then insert records one at a time. Everything else
//! (indexing, vectorization, query execution) belongs to the external store.
//!
//! # Stores
//!
//! - `MemoryStore`: Deterministic in-process store for testing
//! - `WeaviateStore`: Weaviate REST API integration
//!
//! # Examples
//!
//! ```
//! use sustain_store::MemoryStore;
//! use sustain_domain::traits::DocumentStore;
//! use sustain_domain::{CollectionSchema, PropertyValue};
//!
//! let mut store = MemoryStore::new();
//! store.create_collection(&CollectionSchema::narrative("Pages", "test")).unwrap();
//! store.insert("Pages", &[("page", PropertyValue::Int(1))]).unwrap();
//! assert_eq!(store.record_count("Pages"), 1);
//! ```

#![warn(missing_docs)]

pub mod weaviate;

use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use sustain_domain::traits::DocumentStore;
use sustain_domain::{CollectionSchema, PropertyValue};
use thiserror::Error;

pub use weaviate::{WeaviateConfig, WeaviateStore};

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Store unreachable (DNS, refused connection, not ready)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Credentials missing or refused
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Store refused the request as invalid
    #[error("Request rejected (HTTP {status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body as returned by the store
        body: String,
    },

    /// Network or server-side failure after retries
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Record cannot be encoded for the store
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Collection does not exist
    #[error("Collection not found: {0}")]
    NotFound(String),

    /// Failure injected by a test store
    #[error("Injected failure: {0}")]
    Injected(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            StoreError::Connection(e.to_string())
        } else if e.is_timeout() {
            StoreError::Communication(format!("Request timeout: {}", e))
        } else if e.is_decode() {
            StoreError::InvalidResponse(e.to_string())
        } else if e.is_status() {
            match e.status() {
                Some(status) if status.is_client_error() => StoreError::Rejected {
                    status: status.as_u16(),
                    body: e.to_string(),
                },
                Some(status) => StoreError::Communication(format!("Server error (HTTP {})", status)),
                None => StoreError::Communication(e.to_string()),
            }
        } else {
            StoreError::Communication(e.to_string())
        }
    }
}

/// One collection held by a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    /// Schema the collection was declared with
    pub schema: CollectionSchema,

    /// Inserted records in insertion order
    pub records: Vec<Vec<(String, PropertyValue)>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    collections: BTreeMap<String, MemoryCollection>,
    insert_calls: usize,
    fail_inserts_after: Option<usize>,
    failing_inserts: HashSet<usize>,
    failing_collections: HashSet<String>,
    fail_schema_changes: bool,
}

/// In-process document store for deterministic testing
///
/// This store keeps collections in memory without making any network calls.
/// Clones share the same state, so a test can hand one handle to the
/// pipeline and inspect the results through another.
///
/// # Examples
///
/// ```
/// use sustain_store::MemoryStore;
/// use sustain_domain::traits::DocumentStore;
/// use sustain_domain::{CollectionSchema, PropertyValue};
///
/// let store = MemoryStore::new();
/// let mut handle = store.clone();
/// handle.create_collection(&CollectionSchema::narrative("Pages", "test")).unwrap();
///
/// // The second insert call fails
/// store.fail_insert_call(2);
/// assert!(handle.insert("Pages", &[("page", PropertyValue::Int(1))]).is_ok());
/// assert!(handle.insert("Pages", &[("page", PropertyValue::Int(2))]).is_err());
/// assert_eq!(store.record_count("Pages"), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fail every insert after the first `n` insert calls
    pub fn fail_inserts_after(&self, n: usize) {
        self.state().fail_inserts_after = Some(n);
    }

    /// Fail the insert call with this 1-based ordinal
    pub fn fail_insert_call(&self, ordinal: usize) {
        self.state().failing_inserts.insert(ordinal);
    }

    /// Fail every insert into the named collection
    pub fn fail_collection(&self, name: impl Into<String>) {
        self.state().failing_collections.insert(name.into());
    }

    /// Fail every create and delete of a collection
    pub fn fail_schema_changes(&self) {
        self.state().fail_schema_changes = true;
    }

    /// Clear all injected failures
    pub fn heal(&self) {
        let mut state = self.state();
        state.fail_inserts_after = None;
        state.failing_inserts.clear();
        state.failing_collections.clear();
        state.fail_schema_changes = false;
    }

    /// Names of all existing collections, sorted
    pub fn collection_names(&self) -> Vec<String> {
        self.state().collections.keys().cloned().collect()
    }

    /// Schema of a collection, if it exists
    pub fn schema(&self, name: &str) -> Option<CollectionSchema> {
        self.state().collections.get(name).map(|c| c.schema.clone())
    }

    /// Snapshot of the records of a collection (empty if it does not exist)
    pub fn records(&self, name: &str) -> Vec<Vec<(String, PropertyValue)>> {
        self.state()
            .collections
            .get(name)
            .map(|c| c.records.clone())
            .unwrap_or_default()
    }

    /// Number of records in a collection
    pub fn record_count(&self, name: &str) -> usize {
        self.state()
            .collections
            .get(name)
            .map_or(0, |c| c.records.len())
    }

    /// Number of insert calls made so far, successful or not
    pub fn insert_calls(&self) -> usize {
        self.state().insert_calls
    }
}

impl DocumentStore for MemoryStore {
    type Error = StoreError;

    fn collection_exists(&self, name: &str) -> Result<bool, Self::Error> {
        Ok(self.state().collections.contains_key(name))
    }

    fn delete_collection(&mut self, name: &str) -> Result<(), Self::Error> {
        let mut state = self.state();
        if state.fail_schema_changes {
            return Err(StoreError::Injected(format!("delete of {}", name)));
        }
        state
            .collections
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn create_collection(&mut self, schema: &CollectionSchema) -> Result<(), Self::Error> {
        let mut state = self.state();
        if state.fail_schema_changes {
            return Err(StoreError::Injected(format!("create of {}", schema.name)));
        }
        if state.collections.contains_key(&schema.name) {
            return Err(StoreError::Rejected {
                status: 422,
                body: format!("class name {} already exists", schema.name),
            });
        }
        state.collections.insert(
            schema.name.clone(),
            MemoryCollection {
                schema: schema.clone(),
                records: Vec::new(),
            },
        );
        Ok(())
    }

    fn insert(
        &mut self,
        collection: &str,
        properties: &[(&str, PropertyValue)],
    ) -> Result<(), Self::Error> {
        let mut state = self.state();
        state.insert_calls += 1;
        let call = state.insert_calls;

        let injected = state.failing_inserts.contains(&call)
            || state.failing_collections.contains(collection)
            || state.fail_inserts_after.is_some_and(|n| call > n);
        if injected {
            return Err(StoreError::Injected(format!(
                "insert #{} into {}",
                call, collection
            )));
        }

        let target = state
            .collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::NotFound(collection.to_string()))?;
        target
            .schema
            .check(properties)
            .map_err(|body| StoreError::Rejected { status: 422, body })?;
        target.records.push(
            properties
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect(),
        );
        Ok(())
    }
}
