//! Record loading, one insert per record

use crate::config::{LoaderConfig, OnInsertError};
use crate::error::IngestError;
use crate::types::{LoadFailure, LoadReport};
use std::fmt::Display;
use sustain_domain::traits::DocumentStore;
use sustain_domain::Record;
use tracing::{debug, warn};

/// Writes record sequences into store collections
pub struct Loader<'s, S> {
    store: &'s mut S,
    config: LoaderConfig,
}

impl<'s, S> Loader<'s, S>
where
    S: DocumentStore,
    S::Error: Display,
{
    /// Create a loader over a borrowed store session
    pub fn new(store: &'s mut S, config: LoaderConfig) -> Self {
        Self { store, config }
    }

    /// Insert every record of a sequence into one collection
    ///
    /// Records are consumed one at a time and dropped after their insert.
    /// Under [`OnInsertError::Continue`] failures are collected in the
    /// returned report; under [`OnInsertError::Abort`] the first failure is
    /// returned as [`IngestError::Insert`].
    pub fn load<R, I>(&mut self, collection: &str, records: I) -> Result<LoadReport, IngestError>
    where
        R: Record,
        I: IntoIterator<Item = R>,
    {
        let mut report = LoadReport::new(collection);

        for (ordinal, record) in records.into_iter().enumerate() {
            report.attempted += 1;
            let properties = record.properties();

            match self.store.insert(collection, &properties) {
                Ok(()) => {
                    report.inserted += 1;
                    debug!(collection, ordinal, "Record inserted");
                }
                Err(e) => {
                    let message = e.to_string();
                    if self.config.on_error == OnInsertError::Abort {
                        return Err(IngestError::Insert {
                            collection: collection.to_string(),
                            ordinal,
                            message,
                        });
                    }
                    warn!(collection, ordinal, error = %message, "Insert failed, continuing");
                    report.failures.push(LoadFailure { ordinal, message });
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sustain_domain::{CollectionSchema, NarrativePassage};
    use sustain_store::MemoryStore;

    fn passages(n: u32) -> Vec<NarrativePassage> {
        (1..=n)
            .map(|page| NarrativePassage {
                page,
                section: "Narrative".to_string(),
                text: format!("page {}", page),
            })
            .collect()
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new();
        store
            .create_collection(&CollectionSchema::narrative("Pages", "test"))
            .unwrap();
        store
    }

    #[test]
    fn test_one_insert_per_record() {
        let mut store = store();
        let report = Loader::new(&mut store, LoaderConfig::default())
            .load("Pages", passages(5))
            .unwrap();

        assert_eq!(report.attempted, 5);
        assert_eq!(report.inserted, 5);
        assert_eq!(report.failed(), 0);
        assert_eq!(store.insert_calls(), 5);
        assert_eq!(store.record_count("Pages"), 5);
    }

    #[test]
    fn test_continue_records_failure_and_keeps_going() {
        let mut store = store();
        store.fail_insert_call(2);

        let report = Loader::new(&mut store, LoaderConfig::default())
            .load("Pages", passages(4))
            .unwrap();

        assert_eq!(report.attempted, 4);
        assert_eq!(report.inserted, 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].ordinal, 1);
        assert_eq!(store.record_count("Pages"), 3);
    }

    #[test]
    fn test_abort_stops_at_first_failure() {
        let mut store = store();
        store.fail_insert_call(3);

        let config = LoaderConfig {
            on_error: OnInsertError::Abort,
        };
        let result = Loader::new(&mut store, config).load("Pages", passages(10));

        match result {
            Err(IngestError::Insert {
                collection,
                ordinal,
                ..
            }) => {
                assert_eq!(collection, "Pages");
                assert_eq!(ordinal, 2);
            }
            other => panic!("Expected Insert error, got {:?}", other),
        }
        assert_eq!(store.insert_calls(), 3);
        assert_eq!(store.record_count("Pages"), 2);
    }

    #[test]
    fn test_missing_collection_counts_as_failure() {
        let mut store = MemoryStore::new();
        let report = Loader::new(&mut store, LoaderConfig::default())
            .load("Nowhere", passages(2))
            .unwrap();
        assert_eq!(report.failed(), 2);
        assert_eq!(report.inserted, 0);
    }

    #[test]
    fn test_empty_sequence() {
        let mut store = store();
        let report = Loader::new(&mut store, LoaderConfig::default())
            .load("Pages", Vec::<NarrativePassage>::new())
            .unwrap();
        assert_eq!(report, LoadReport::new("Pages"));
    }
}
