//! KPI dataset parsing and fact expansion
//!
//! The dataset nests values per metric (`metric → {year: value}`); expansion
//! flattens it into one [`KpiFact`] per (metric, year) pair.

use crate::error::IngestError;
use serde_json::{Map, Value};
use std::path::Path;
use sustain_domain::KpiFact;

/// One validated entry of the `kpis` list
#[derive(Debug, Clone, PartialEq)]
pub struct KpiEntry {
    /// Reporting category
    pub category: String,

    /// Metric name
    pub metric: String,

    /// Unit of measure
    pub unit: String,

    /// `(year label, value)` pairs in document order
    pub values: Vec<(String, f64)>,

    /// Notes, empty when absent
    pub notes: String,
}

impl KpiEntry {
    /// Expand this entry into one fact per recorded year
    pub fn facts<'a>(&'a self, source: &'a str) -> impl Iterator<Item = KpiFact> + 'a {
        self.values.iter().map(move |(year, value)| KpiFact {
            category: self.category.clone(),
            metric: self.metric.clone(),
            unit: self.unit.clone(),
            year: year.clone(),
            value: *value,
            notes: self.notes.clone(),
            source: source.to_string(),
        })
    }
}

/// A fully validated KPI dataset
///
/// Validation covers the whole document before any fact is produced, so a
/// malformed entry late in the list can never leave earlier facts half-loaded.
///
/// # Examples
///
/// ```
/// use sustain_ingest::KpiDataset;
///
/// let dataset = KpiDataset::from_json(r#"{"kpis": [{
///     "category": "Water", "metric": "Withdrawal", "unit": "m3",
///     "values": {"2022": 100, "2023": 90}
/// }]}"#).unwrap();
///
/// let facts: Vec<_> = dataset.facts("Report 2024").collect();
/// assert_eq!(facts.len(), 2);
/// assert_eq!(facts[1].year, "2023");
/// assert_eq!(facts[1].notes, "");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiDataset {
    entries: Vec<KpiEntry>,
}

impl KpiDataset {
    /// Read and validate a dataset file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate a dataset from a JSON string
    pub fn from_json(json: &str) -> Result<Self, IngestError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Validate a dataset from an already parsed JSON value
    pub fn from_value(value: &Value) -> Result<Self, IngestError> {
        let root = value
            .as_object()
            .ok_or_else(|| IngestError::InvalidDataset("expected a JSON object".to_string()))?;
        let kpis = root
            .get("kpis")
            .ok_or_else(|| IngestError::InvalidDataset("missing 'kpis' list".to_string()))?
            .as_array()
            .ok_or_else(|| IngestError::InvalidDataset("'kpis' must be a list".to_string()))?;

        let entries = kpis
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_entry(index, entry))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    /// Validated entries in document order
    pub fn entries(&self) -> &[KpiEntry] {
        &self.entries
    }

    /// Number of facts [`facts`](Self::facts) will produce
    pub fn fact_count(&self) -> usize {
        self.entries.iter().map(|e| e.values.len()).sum()
    }

    /// Lazily expand every entry into facts
    ///
    /// Order is entries in document order, then years in document order.
    pub fn facts<'a>(&'a self, source: &'a str) -> impl Iterator<Item = KpiFact> + 'a {
        self.entries.iter().flat_map(move |entry| entry.facts(source))
    }
}

fn invalid(index: usize, field: &str, reason: impl Into<String>) -> IngestError {
    IngestError::Validation {
        index,
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn required_string(
    index: usize,
    entry: &Map<String, Value>,
    field: &str,
    allow_empty: bool,
) -> Result<String, IngestError> {
    let value = entry
        .get(field)
        .ok_or_else(|| invalid(index, field, "is missing"))?;
    let text = value
        .as_str()
        .ok_or_else(|| invalid(index, field, format!("must be a string, got {}", value)))?;
    if !allow_empty && text.trim().is_empty() {
        return Err(invalid(index, field, "is empty"));
    }
    Ok(text.to_string())
}

fn parse_entry(index: usize, entry: &Value) -> Result<KpiEntry, IngestError> {
    let entry = entry
        .as_object()
        .ok_or_else(|| invalid(index, "kpis", "entry must be an object"))?;

    let category = required_string(index, entry, "category", false)?;
    let metric = required_string(index, entry, "metric", false)?;
    let unit = required_string(index, entry, "unit", true)?;

    let values = entry
        .get("values")
        .ok_or_else(|| invalid(index, "values", "is missing"))?
        .as_object()
        .ok_or_else(|| invalid(index, "values", "must be a year → number mapping"))?
        .iter()
        .map(|(year, value)| match value.as_f64() {
            Some(number) if number.is_finite() => Ok((year.clone(), number)),
            _ => Err(invalid(
                index,
                "values",
                format!("year '{}' has non-numeric value {}", year, value),
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let notes = match entry.get("notes") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(invalid(index, "notes", format!("must be a string, got {}", other)))
        }
    };

    Ok(KpiEntry {
        category,
        metric,
        unit,
        values,
        notes,
    })
}
