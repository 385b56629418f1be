//! Sustain Ingest
//!
//! Loads a sustainability report into a document store as two collections:
//! flat per-year KPI facts and per-page narrative passages.
//!
//! # Overview
//!
//! A run has three strictly ordered stages:
//!
//! 1. **Provisioning**: both collections are dropped (if present) and
//!    recreated from their schemas, so every run starts clean.
//! 2. **Facts**: the nested KPI dataset (`metric → {year: value}`) is
//!    validated up front, then expanded into one record per (metric, year).
//! 3. **Passages**: document pages are walked in order; a known tabular page
//!    range is skipped, low-signal pages are dropped, and whitespace is
//!    normalized.
//!
//! # Architecture
//!
//! ```text
//! KpiDataset ──► facts ─────┐
//!                           ├──► Loader ──► DocumentStore
//! PageSource ──► passages ──┘
//! ```
//!
//! Both record sequences are lazy iterators; each record is inserted with its
//! own store call and dropped afterwards.
//!
//! # Example Usage
//!
//! ```no_run
//! use sustain_ingest::{IngestConfig, KpiDataset, PdfDocument, Pipeline};
//! use sustain_store::{WeaviateConfig, WeaviateStore};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let dataset = KpiDataset::load("ferrero_environment_kpis.gold.json")?;
//! let document = PdfDocument::open("ferrero-group-2024-sustainability-report.pdf")?;
//! let mut store = WeaviateStore::connect(WeaviateConfig::new("http://localhost:8080"))?;
//!
//! let pipeline = Pipeline::new(IngestConfig::default())?;
//! let summary = pipeline.run(&mut store, &dataset, &document)?.into_result()?;
//!
//! println!("Facts: {}", summary.facts.inserted);
//! println!("Passages: {}", summary.narrative.inserted);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod kpi;
mod loader;
mod narrative;
mod pdf;
mod pipeline;
mod provision;
mod types;


pub use config::{IngestConfig, LoaderConfig, NarrativeConfig, OnInsertError};
pub use error::IngestError;
pub use kpi::{KpiDataset, KpiEntry};
pub use loader::Loader;
pub use narrative::{normalize_whitespace, NarrativeExtractor, Passages};
pub use pdf::{PageError, PdfDocument};
pub use pipeline::Pipeline;
pub use provision::provision;
pub use types::{ExtractStats, LoadFailure, LoadReport, ProvisionReport, RunSummary};
