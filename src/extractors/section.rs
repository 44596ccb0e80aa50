// src/extractors/section.rs

// --- Imports ---
use crate::dom::{Document, NodeId};
use crate::extractors::normalize::{normalize_text, word_count};
use crate::utils::error::ExtractError;

// --- Constants ---
// Elements that may hold a section heading.
const START_CANDIDATE_TAGS: [&str; 2] = ["table", "div"];
// Elements visited while collecting section text.
const STRUCTURAL_TAGS: [&str; 3] = ["p", "div", "table"];
// Longer candidates are bulk content that merely mentions the label.
const MAX_START_MARKER_WORDS: usize = 5;
// Body nodes need more words than this to count as prose.
const MIN_BODY_WORDS_EXCLUSIVE: usize = 2;
// Table rows flattened to text tend to keep their column separators.
const TABLE_ROW_SEPARATOR: char = '|';

/// Start and end labels of a section, e.g. `1a` / `1b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionLabels {
    pub start: String,
    pub end: String,
}

impl SectionLabels {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    fn start_marker(&self) -> String {
        format!("item {}", self.start.to_lowercase())
    }

    fn end_marker(&self) -> String {
        format!("item {}", self.end.to_lowercase())
    }
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self::new("1a", "1b")
    }
}

// --- Data Structures ---
#[derive(Debug, Clone)]
pub struct ExtractedSection {
    pub url: String,           // Where the filing was fetched from
    pub labels: SectionLabels, // e.g., 1a -> 1b
    pub content: String,       // Normalized section text
}

impl ExtractedSection {
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }
}

// --- Main Extractor Structure ---
pub struct SectionExtractor {
    labels: SectionLabels,
}

impl SectionExtractor {
    pub fn new(labels: SectionLabels) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &SectionLabels {
        &self.labels
    }

    /// Extracts the section text from a cleaned document.
    ///
    /// Returns `Ok(None)` when no start marker exists. A start marker with no
    /// end marker after it is an error rather than a truncated result.
    pub fn extract(&self, document: &Document) -> Result<Option<String>, ExtractError> {
        let order = document.document_order();

        // 1. Find the start marker
        let Some(start_index) = self.find_start_marker(document, &order) else {
            tracing::info!("Start marker '{}' not found", self.labels.start_marker());
            return Ok(None);
        };

        // 2. Collect text until the end marker
        let end_marker = self.labels.end_marker();
        let mut lines = String::new();
        let mut end_found = false;

        for &id in order[start_index + 1..]
            .iter()
            .filter(|&&id| document.is_element_in(id, &STRUCTURAL_TAGS))
        {
            let raw_text = document.text(id);
            let text = normalize_text(&raw_text);

            if text.to_lowercase().contains(&end_marker) {
                tracing::debug!(
                    "Found end marker in <{}>: '{}'",
                    document.tag(id).unwrap_or_default(),
                    text.trim()
                );
                end_found = true;
                break;
            }

            if word_count(&raw_text) > MIN_BODY_WORDS_EXCLUSIVE
                && !text.contains(TABLE_ROW_SEPARATOR)
            {
                lines.push(' ');
                lines.push_str(&text);
            } else {
                tracing::trace!("Skipping short or tabular text: '{}'", text.trim());
            }
        }

        if !end_found {
            tracing::error!("Reached end of document without finding '{}'", end_marker);
            return Err(ExtractError::EndSectionNotFound {
                start: self.labels.start.clone(),
                end: self.labels.end.clone(),
            });
        }

        // 3. Drop the leading joining space
        let section = lines.get(1..).unwrap_or_default().to_string();
        tracing::info!(
            "Extracted section '{}' -> '{}': {} bytes",
            self.labels.start,
            self.labels.end,
            section.len()
        );
        Ok(Some(section))
    }

    /// Index into `order` of the start marker node.
    ///
    /// Every short `table`/`div` whose text mentions the start label is a
    /// candidate; the last one in document order wins.
    fn find_start_marker(&self, document: &Document, order: &[NodeId]) -> Option<usize> {
        let start_marker = self.labels.start_marker();
        let mut found = None;

        for (index, &id) in order.iter().enumerate() {
            if !document.is_element_in(id, &START_CANDIDATE_TAGS) {
                continue;
            }
            let text = normalize_text(&document.text(id));
            if word_count(&text) > MAX_START_MARKER_WORDS {
                continue;
            }
            if text.to_lowercase().contains(&start_marker) {
                tracing::debug!(
                    "Candidate start marker <{}>: '{}'",
                    document.tag(id).unwrap_or_default(),
                    text.trim()
                );
                found = Some(index);
            }
        }

        found
    }
}

/// Extracts the text between `item <start>` and `item <end>` from a cleaned document.
#[allow(dead_code)]
pub fn extract_section(
    document: &Document,
    start: &str,
    end: &str,
) -> Result<Option<String>, ExtractError> {
    SectionExtractor::new(SectionLabels::new(start, end)).extract(document)
}
