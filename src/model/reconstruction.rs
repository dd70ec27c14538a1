//! Whole-document reconstruction output.

use super::PageContent;
use crate::render::keyed_page;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reconstructed pages of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// Number of pages in the source document
    pub page_count: u32,

    /// Reconstructed pages in page order
    pub pages: Vec<PageContent>,

    /// Pages that could not be reconstructed (lenient mode only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<PageFailure>,
}

impl Reconstruction {
    /// Create an empty reconstruction.
    pub fn new(page_count: u32) -> Self {
        Self {
            page_count,
            pages: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page: u32) -> Option<&PageContent> {
        self.pages.iter().find(|p| p.page == page)
    }

    /// Check if every selected page was reconstructed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Summary counts.
    pub fn stats(&self) -> ReconstructionStats {
        let mut stats = ReconstructionStats::new();
        for page in &self.pages {
            stats.add_page(page);
        }
        stats.failed_page_count = self.failures.len() as u32;
        stats
    }

    /// Get plain text content of all pages.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(PageContent::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A page whose reconstruction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    /// Page number
    pub page: u32,

    /// Error message
    pub message: String,
}

/// Counts collected over a reconstruction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructionStats {
    /// Pages reconstructed
    pub page_count: u32,

    /// Sections emitted
    pub section_count: u32,

    /// Key-value pairs attached to sections
    pub key_value_count: u32,

    /// Tables attached to sections
    pub table_count: u32,

    /// Pages that failed
    pub failed_page_count: u32,
}

impl ReconstructionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the counts of one page.
    pub fn add_page(&mut self, page: &PageContent) {
        self.page_count += 1;
        self.section_count += page.section_count() as u32;
        self.key_value_count += page.key_value_count() as u32;
        self.table_count += page.table_count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &ReconstructionStats) {
        self.page_count += other.page_count;
        self.section_count += other.section_count;
        self.key_value_count += other.key_value_count;
        self.table_count += other.table_count;
        self.failed_page_count += other.failed_page_count;
    }
}

/// Storage record for one analysed file.
///
/// This is the value handed to whatever store keeps reconstruction results;
/// writing it is up to the caller. Pages are kept in the keyed layout, one
/// `{"<line>": {"KeyValue": {...}, "Tables": [...]|null}}` entry per section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReconstructionRecord {
    /// Record key (usually the source object name)
    pub id: String,

    /// Location of the analysed file
    pub file_path: String,

    /// When the record was produced
    #[serde(rename = "DateTime")]
    pub created_at: DateTime<Utc>,

    /// Reconstructed pages, each as `{"Page": n, "Content": [...]}`
    pub pages: Vec<Value>,
}

impl ReconstructionRecord {
    /// Create a record stamped with the current time.
    pub fn new(id: impl Into<String>, file_path: impl Into<String>, reconstruction: Reconstruction) -> Self {
        Self {
            id: id.into(),
            file_path: file_path.into(),
            created_at: Utc::now(),
            pages: reconstruction.pages.iter().map(keyed_page).collect(),
        }
    }

    /// Override the timestamp and return self.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}
