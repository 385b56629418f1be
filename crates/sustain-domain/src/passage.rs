//! Passage module - one page of narrative text

use crate::record::{PropertyValue, Record};

/// Default section label for narrative passages
pub const DEFAULT_SECTION: &str = "Narrative";

/// One page's worth of normalized body text from the report
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativePassage {
    /// 1-based page number in the source document
    pub page: u32,

    /// Section classification
    pub section: String,

    /// Whitespace-normalized page text
    pub text: String,
}

impl Record for NarrativePassage {
    fn properties(&self) -> Vec<(&'static str, PropertyValue)> {
        vec![
            ("page", PropertyValue::Int(i64::from(self.page))),
            ("section", PropertyValue::Text(self.section.clone())),
            ("text", PropertyValue::Text(self.text.clone())),
        ]
    }
}
