//! Pipeline orchestration: provision, then facts, then passages

use crate::config::IngestConfig;
use crate::error::IngestError;
use crate::kpi::KpiDataset;
use crate::loader::Loader;
use crate::narrative::NarrativeExtractor;
use crate::provision::provision;
use crate::types::RunSummary;
use std::fmt::Display;
use std::time::Instant;
use sustain_domain::traits::{DocumentStore, PageSource};
use sustain_domain::CollectionSchema;
use tracing::info;

/// One configured ingestion pipeline
///
/// # Examples
///
/// ```
/// use sustain_ingest::{IngestConfig, KpiDataset, Pipeline};
/// use sustain_domain::traits::PageSource;
/// use sustain_store::MemoryStore;
///
/// struct Blank;
///
/// impl PageSource for Blank {
///     type Error = String;
///     fn page_count(&self) -> u32 { 3 }
///     fn page_text(&self, _: u32) -> Result<String, String> { Ok(String::new()) }
/// }
///
/// let dataset = KpiDataset::from_json(r#"{"kpis": [{
///     "category": "Water", "metric": "Withdrawal", "unit": "m3",
///     "values": {"2022": 100, "2023": 90}
/// }]}"#).unwrap();
///
/// let mut store = MemoryStore::new();
/// let pipeline = Pipeline::new(IngestConfig::default()).unwrap();
/// let summary = pipeline.run(&mut store, &dataset, &Blank).unwrap();
///
/// assert_eq!(summary.facts.inserted, 2);
/// assert_eq!(summary.narrative.inserted, 0);
/// assert_eq!(store.record_count("FerreroKPI"), 2);
/// ```
pub struct Pipeline {
    config: IngestConfig,
    fact_schema: CollectionSchema,
    narrative_schema: CollectionSchema,
    extractor: NarrativeExtractor,
}

impl Pipeline {
    /// Validate the configuration and build the pipeline
    pub fn new(config: IngestConfig) -> Result<Self, IngestError> {
        config.validate().map_err(IngestError::Config)?;
        let fact_schema = config.fact_schema().map_err(IngestError::Config)?;
        let narrative_schema = config.narrative_schema().map_err(IngestError::Config)?;
        let extractor = NarrativeExtractor::new(config.narrative.clone());

        Ok(Self {
            config,
            fact_schema,
            narrative_schema,
            extractor,
        })
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Run all stages in order against one store session
    ///
    /// Failed inserts under the `continue` policy do not make this return
    /// an error; use [`RunSummary::into_result`] for the overall verdict.
    pub fn run<S, P>(
        &self,
        store: &mut S,
        dataset: &KpiDataset,
        source: &P,
    ) -> Result<RunSummary, IngestError>
    where
        S: DocumentStore,
        S::Error: Display,
        P: PageSource,
        P::Error: Display,
    {
        let started = Instant::now();

        let schemas = [self.fact_schema.clone(), self.narrative_schema.clone()];
        let provision_report = provision(store, &schemas)?;
        info!(
            dropped = provision_report.dropped.len(),
            created = provision_report.created.len(),
            "Schema ready"
        );

        let mut loader = Loader::new(store, self.config.loader.clone());

        let facts = loader.load(
            &self.fact_schema.name,
            dataset.facts(&self.config.source_label),
        )?;
        info!(
            collection = %facts.collection,
            inserted = facts.inserted,
            failed = facts.failed(),
            "Facts inserted"
        );

        let mut passages = self.extractor.passages(source);
        let narrative = loader.load(&self.narrative_schema.name, passages.by_ref())?;
        let extraction = passages.stats().clone();
        info!(
            collection = %narrative.collection,
            inserted = narrative.inserted,
            failed = narrative.failed(),
            pages = extraction.pages_seen,
            excluded = extraction.excluded,
            unreadable = extraction.unreadable,
            too_short = extraction.too_short,
            "Narrative inserted"
        );

        Ok(RunSummary {
            provision: provision_report,
            facts,
            narrative,
            extraction,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        })
    }
}
