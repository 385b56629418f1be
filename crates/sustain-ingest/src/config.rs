//! Configuration for the ingestion pipeline

use serde::{Deserialize, Serialize};
use sustain_domain::{CollectionSchema, Vectorizer};

/// What the loader does when a single insert fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnInsertError {
    /// Record the failure and keep inserting; the run still fails at the end
    #[default]
    Continue,
    /// Stop at the first failed insert
    Abort,
}

/// Loader settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Per-record failure policy
    pub on_error: OnInsertError,
}

/// Narrative extraction settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    /// Inclusive page range that is never turned into passages
    pub excluded_pages: Option<(u32, u32)>,

    /// Minimum raw text length (characters) for a page to become a passage
    pub min_chars: usize,

    /// Section label attached to every passage
    pub section: String,
}

impl Default for NarrativeConfig {
    /// Pages 93-121 hold the KPI tables of the 2024 report
    fn default() -> Self {
        Self {
            excluded_pages: Some((93, 121)),
            min_chars: 200,
            section: sustain_domain::passage::DEFAULT_SECTION.to_string(),
        }
    }
}

/// Configuration for one ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Source label stamped on every fact
    pub source_label: String,

    /// Fact collection name
    pub kpi_collection: String,

    /// Fact collection description
    pub kpi_description: String,

    /// Passage collection name
    pub narrative_collection: String,

    /// Passage collection description
    pub narrative_description: String,

    /// Embedding provider module for both collections
    pub vectorizer: String,

    /// Narrative extraction settings
    pub narrative: NarrativeConfig,

    /// Loader settings
    pub loader: LoaderConfig,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_label: "Ferrero Sustainability Report 2024".to_string(),
            kpi_collection: "FerreroKPI".to_string(),
            kpi_description:
                "Structured environmental KPIs from Ferrero Sustainability Report 2024".to_string(),
            narrative_collection: "FerreroNarrative".to_string(),
            narrative_description: "Narrative sections of Ferrero Sustainability Report 2024"
                .to_string(),
            vectorizer: Vectorizer::Text2VecOpenAi.as_str().to_string(),
            narrative: NarrativeConfig::default(),
            loader: LoaderConfig::default(),
        }
    }
}

/// Collection names must look like Weaviate class names
fn check_collection_name(field: &str, name: &str) -> Result<(), String> {
    let first = name
        .chars()
        .next()
        .ok_or_else(|| format!("{} must not be empty", field))?;
    if !first.is_ascii_uppercase() {
        return Err(format!("{} '{}' must start with an uppercase letter", field, name));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!(
            "{} '{}' may only contain letters, digits and underscores",
            field, name
        ));
    }
    Ok(())
}

impl IngestConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        check_collection_name("kpi_collection", &self.kpi_collection)?;
        check_collection_name("narrative_collection", &self.narrative_collection)?;
        if self.kpi_collection == self.narrative_collection {
            return Err("kpi_collection and narrative_collection must differ".to_string());
        }
        if self.source_label.trim().is_empty() {
            return Err("source_label must not be empty".to_string());
        }
        if let Some((first, last)) = self.narrative.excluded_pages {
            if first == 0 {
                return Err("excluded_pages are 1-based; 0 is not a page".to_string());
            }
            if first > last {
                return Err(format!("excluded_pages start {} is after end {}", first, last));
            }
        }
        self.vectorizer_kind()?;
        Ok(())
    }

    fn vectorizer_kind(&self) -> Result<Vectorizer, String> {
        self.vectorizer.parse()
    }

    /// Schema of the fact collection
    pub fn fact_schema(&self) -> Result<CollectionSchema, String> {
        Ok(
            CollectionSchema::kpi_facts(&self.kpi_collection, &self.kpi_description)
                .with_vectorizer(self.vectorizer_kind()?),
        )
    }

    /// Schema of the passage collection
    pub fn narrative_schema(&self) -> Result<CollectionSchema, String> {
        Ok(
            CollectionSchema::narrative(&self.narrative_collection, &self.narrative_description)
                .with_vectorizer(self.vectorizer_kind()?),
        )
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
