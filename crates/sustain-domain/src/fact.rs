//! Fact module - one measured KPI value for one year

use crate::record::{PropertyValue, Record};

/// One atomic KPI measurement: a single (metric, year, value) triple
///
/// A metric recorded for N years expands into N facts that share
/// `category`, `metric`, `unit`, `notes` and `source`.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiFact {
    /// Reporting category (e.g., "Water")
    pub category: String,

    /// Metric name (e.g., "Withdrawal")
    pub metric: String,

    /// Unit of measure (e.g., "m3")
    pub unit: String,

    /// Year label as it appears in the dataset; not necessarily numeric
    pub year: String,

    /// Measured value
    pub value: f64,

    /// Free-form notes, empty when the dataset has none
    pub notes: String,

    /// Source label, constant for one ingestion run
    pub source: String,
}

impl Record for KpiFact {
    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![
            ("category", PropertyValue::Text(self.category.clone())),
            ("metric", PropertyValue::Text(self.metric.clone())),
            ("unit", PropertyValue::Text(self.unit.clone())),
            ("year", PropertyValue::Text(self.year.clone())),
            ("value", PropertyValue::Number(self.value)),
            ("notes", PropertyValue::Text(self.notes.clone())),
            ("source", PropertyValue::Text(self.source.clone())),
        ]
    }
}
