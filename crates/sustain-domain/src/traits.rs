//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the ingestion pipeline and
//! infrastructure. Implementations live in other crates.

use crate::record::PropertyValue;
use crate::schema::CollectionSchema;

/// Narrow write interface to an external document store
///
/// Implemented by the infrastructure layer (sustain-store). Each call is a
/// single blocking operation; there is no batching or transaction.
pub trait DocumentStore {
    /// Error type for store operations
    type Error;

    /// Whether a collection with this name currently exists
    fn collection_exists(&self, name: &str) -> Result<bool, Self::Error>;

    /// Delete a collection and everything in it
    fn delete_collection(&mut self, name: &str) -> Result<(), Self::Error>;

    /// Declare a new, empty collection
    fn create_collection(&mut self, schema: &CollectionSchema) -> Result<(), Self::Error>;

    /// Insert one record into a collection
    fn insert(
        &mut self,
        collection: &str,
        properties: &[(&str, PropertyValue)],
    ) -> Result<(), Self::Error>;
}

/// An ordered sequence of pages with best-effort text extraction
///
/// Implemented by the application layer (sustain-ingest). Pages are numbered
/// from 1 in document order.
pub trait PageSource {
    /// Error type for a single page extraction
    type Error;

    /// Total number of pages
    fn page_count(&self) -> u32;

    /// Extract the raw text of one page
    fn page_text(&self, page_number: u32) -> Result<String, Self::Error>;
}
