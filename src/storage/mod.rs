// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};
use crate::extractors::section::ExtractedSection;
use crate::utils::error::StorageError;
use serde::Serialize;

const FALLBACK_DOC_STEM: &str = "document";

/// JSON sidecar written next to a saved section
#[derive(Debug, Serialize)]
struct SectionMetadata<'a> {
    url: &'a str,
    section_start: &'a str,
    section_end: &'a str,
    content_length: usize,
    word_count: usize,
    extraction_timestamp: String,
}

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    /// Directory for everything saved about one document: /base_dir/<doc stem>/
    pub fn document_dir(&self, url: &str) -> Result<PathBuf, StorageError> {
        let target_dir = self.base_dir.join(document_stem(url));
        if !target_dir.exists() {
            fs::create_dir_all(&target_dir).map_err(StorageError::IoError)?;
        }
        Ok(target_dir)
    }

    /// Directory for debug dumps: /base_dir/<doc stem>/debug/
    pub fn debug_dir(&self, url: &str) -> Result<PathBuf, StorageError> {
        let debug_dir = self.document_dir(url)?.join("debug");
        if !debug_dir.exists() {
            fs::create_dir_all(&debug_dir).map_err(StorageError::IoError)?;
        }
        Ok(debug_dir)
    }

    /// Saves the extracted section text to a file
    pub fn save_section(&self, section: &ExtractedSection) -> Result<PathBuf, StorageError> {
        let filename = format!("section_{}.txt", file_label(&section.labels.start));
        let file_path = self.document_dir(&section.url)?.join(filename);

        fs::write(&file_path, section.content.as_bytes()).map_err(StorageError::IoError)?;

        tracing::info!("Saved section to {}", file_path.display());

        Ok(file_path)
    }

    /// Saves metadata about the section in JSON format
    pub fn save_section_metadata(
        &self,
        section: &ExtractedSection,
    ) -> Result<PathBuf, StorageError> {
        let filename = format!("section_{}_meta.json", file_label(&section.labels.start));
        let file_path = self.document_dir(&section.url)?.join(filename);

        // Create metadata structure
        let metadata = SectionMetadata {
            url: &section.url,
            section_start: &section.labels.start,
            section_end: &section.labels.end,
            content_length: section.content.len(),
            word_count: section.word_count(),
            extraction_timestamp: chrono::Utc::now().to_rfc3339(),
        };

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}

/// File-system friendly name for a document URL, e.g. `aapl-20230930` for
/// `https://www.sec.gov/Archives/edgar/data/320193/000032019323000106/aapl-20230930.htm`.
fn document_stem(url: &str) -> String {
    let last_segment = reqwest::Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .last()
            .map(str::to_string)
    });

    let stem = match last_segment {
        Some(segment) => match segment.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem.to_string(),
            _ => segment,
        },
        None => return FALLBACK_DOC_STEM.to_string(),
    };

    let cleaned = file_label(&stem);
    if cleaned.is_empty() {
        FALLBACK_DOC_STEM.to_string()
    } else {
        cleaned
    }
}

/// Keeps ASCII alphanumerics, `-` and `_`; everything else becomes `_`.
fn file_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
