//! Schema provisioning
//!
//! Destroys and recreates each collection so every run starts from empty,
//! correctly-shaped collections.

use crate::error::IngestError;
use crate::types::ProvisionReport;
use std::fmt::Display;
use sustain_domain::traits::DocumentStore;
use sustain_domain::CollectionSchema;
use tracing::info;

/// Drop (if present) and recreate every collection, in the given order
///
/// The first failure stops provisioning; nothing is inserted by this step.
pub fn provision<S>(
    store: &mut S,
    schemas: &[CollectionSchema],
) -> Result<ProvisionReport, IngestError>
where
    S: DocumentStore,
    S::Error: Display,
{
    let mut report = ProvisionReport::default();

    for schema in schemas {
        let failed = |e: S::Error| IngestError::Provision {
            collection: schema.name.clone(),
            message: e.to_string(),
        };

        if store.collection_exists(&schema.name).map_err(failed)? {
            store.delete_collection(&schema.name).map_err(failed)?;
            info!(collection = %schema.name, "Dropped existing collection");
            report.dropped.push(schema.name.clone());
        }

        store.create_collection(schema).map_err(failed)?;
        info!(
            collection = %schema.name,
            properties = schema.properties.len(),
            vectorizer = schema.vectorizer.as_str(),
            "Created collection"
        );
        report.created.push(schema.name.clone());
    }

    Ok(report)
}
