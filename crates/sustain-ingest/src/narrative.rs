//! Narrative passage extraction from paginated documents

use crate::config::NarrativeConfig;
use crate::types::ExtractStats;
use std::fmt::Display;
use sustain_domain::traits::PageSource;
use sustain_domain::NarrativePassage;
use tracing::debug;

/// Collapse every whitespace run into a single space and trim both ends
///
/// Idempotent: normalizing normalized text returns it unchanged.
///
/// # Examples
///
/// ```
/// use sustain_ingest::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  Our\n\ncommitment \t to\r\nwater "), "Our commitment to water");
/// ```
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Turns document pages into narrative passages
pub struct NarrativeExtractor {
    config: NarrativeConfig,
}

impl NarrativeExtractor {
    /// Create a new extractor
    pub fn new(config: NarrativeConfig) -> Self {
        Self { config }
    }

    /// Whether a page falls in the excluded range
    pub fn is_excluded(&self, page: u32) -> bool {
        self.config
            .excluded_pages
            .is_some_and(|(first, last)| (first..=last).contains(&page))
    }

    /// Apply the length filter and normalization to one page's raw text
    ///
    /// The length check runs on the raw text, before normalization.
    pub fn passage_from_text(&self, page: u32, raw: &str) -> Option<NarrativePassage> {
        if raw.is_empty() || raw.chars().count() < self.config.min_chars {
            return None;
        }
        Some(NarrativePassage {
            page,
            section: self.config.section.clone(),
            text: normalize_whitespace(raw),
        })
    }

    /// Lazily walk every page of a source in document order
    ///
    /// Each call starts a fresh pass from page 1.
    pub fn passages<'a, P: PageSource>(&'a self, source: &'a P) -> Passages<'a, P> {
        Passages {
            extractor: self,
            source,
            next_page: 1,
            page_count: source.page_count(),
            stats: ExtractStats::default(),
        }
    }
}

/// Iterator over the passages of one extraction pass
pub struct Passages<'a, P> {
    extractor: &'a NarrativeExtractor,
    source: &'a P,
    next_page: u32,
    page_count: u32,
    stats: ExtractStats,
}

impl<P> Passages<'_, P> {
    /// Page accounting so far
    pub fn stats(&self) -> &ExtractStats {
        &self.stats
    }
}

impl<P> Iterator for Passages<'_, P>
where
    P: PageSource,
    P::Error: Display,
{
    type Item = NarrativePassage;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_page <= self.page_count {
            let page = self.next_page;
            self.next_page += 1;
            self.stats.pages_seen += 1;

            if self.extractor.is_excluded(page) {
                self.stats.excluded += 1;
                continue;
            }

            let raw = match self.source.page_text(page) {
                Ok(text) => text,
                Err(e) => {
                    debug!(page, error = %e, "Text extraction failed, treating page as empty");
                    self.stats.unreadable += 1;
                    continue;
                }
            };

            match self.extractor.passage_from_text(page, &raw) {
                Some(passage) => {
                    self.stats.emitted += 1;
                    return Some(passage);
                }
                None => {
                    debug!(page, chars = raw.chars().count(), "Page below length threshold");
                    self.stats.too_short += 1;
                }
            }
        }
        None
    }
}
