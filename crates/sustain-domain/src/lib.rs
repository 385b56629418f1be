//! Sustain Domain Layer
//!
//! This crate contains the record model and the trait seams for the Sustain
//! ingestion pipeline. It has ZERO external dependencies and defines the
//! fundamental concepts that every other crate depends upon.
//!
//! ## Key Concepts
//!
//! - **Fact**: One atomic (metric, year, value) measurement from the KPI dataset
//! - **Passage**: One page of normalized narrative text from the report
//! - **Collection Schema**: The declared shape of a record family in the store
//! - **Record**: Anything that can be written to a collection as typed properties
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - No external crate dependencies
//! - Pure data and invariants only
//! - Store and document implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fact;
pub mod passage;
pub mod record;
pub mod schema;
pub mod traits;

// Re-exports for convenience
pub use fact::KpiFact;
pub use passage::NarrativePassage;
pub use record::{PropertyValue, Record};
pub use schema::{CollectionSchema, DataType, PropertyDef, Vectorizer};
