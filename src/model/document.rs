//! Document-level types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{AnalysisResponse, Fragment};
use crate::error::Result;

/// A complete OCR analysis: every fragment of every page.
///
/// The document is never mutated by reconstruction, so it can be shared
/// between page workers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Fragments in the order the OCR service returned them
    pub fragments: Vec<Fragment>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from fragments, deriving the page count from them.
    pub fn from_fragments(fragments: Vec<Fragment>) -> Self {
        let page_count = fragments.iter().map(|f| f.page).max().unwrap_or(0);
        Self {
            metadata: Metadata { page_count },
            fragments,
        }
    }

    /// Build a document from a service response.
    ///
    /// When the response carries no page count, the highest page number
    /// seen on any block is used.
    pub fn from_response(response: AnalysisResponse) -> Result<Self> {
        let reported = response.document_metadata.map(|m| m.pages);
        let fragments = response
            .blocks
            .into_iter()
            .map(Fragment::try_from)
            .collect::<Result<Vec<_>>>()?;

        let mut doc = Self::from_fragments(fragments);
        if let Some(pages) = reported {
            doc.metadata.page_count = pages;
        }
        log::debug!(
            "Loaded {} fragments across {} pages",
            doc.fragments.len(),
            doc.metadata.page_count
        );
        Ok(doc)
    }

    /// Build a document from the pages of a paginated result.
    pub fn from_responses<I>(responses: I) -> Result<Self>
    where
        I: IntoIterator<Item = AnalysisResponse>,
    {
        Self::from_response(AnalysisResponse::merge(responses))
    }

    /// Parse a response from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let response: AnalysisResponse = serde_json::from_str(json)?;
        Self::from_response(response)
    }

    /// Parse a response from JSON bytes.
    pub fn from_json_slice(data: &[u8]) -> Result<Self> {
        let response: AnalysisResponse = serde_json::from_slice(data)?;
        Self::from_response(response)
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.metadata.page_count
    }

    /// Check if the document has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Add a fragment, growing the page count if needed.
    pub fn add_fragment(&mut self, fragment: Fragment) {
        self.metadata.page_count = self.metadata.page_count.max(fragment.page);
        self.fragments.push(fragment);
    }

    /// Fragments on one page, in stored order.
    pub fn fragments_on(&self, page: u32) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(move |f| f.page == page)
    }

    /// Count fragments per block type name.
    pub fn kind_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for fragment in &self.fragments {
            *counts.entry(fragment.kind.name().to_string()).or_insert(0) += 1;
        }
        counts
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Total number of pages
    pub page_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_add_fragment_grows_page_count() {
        let mut doc = Document::new();
        doc.add_fragment(Fragment::line("a", 3, BoundingBox::default(), "x"));
        doc.add_fragment(Fragment::line("b", 1, BoundingBox::default(), "y"));
        assert_eq!(doc.page_count(), 3);
        assert_eq!(doc.fragments_on(1).count(), 1);
    }

    #[test]
    fn test_from_json_reported_page_count() {
        let json = r#"{
            "DocumentMetadata": {"Pages": 4},
            "Blocks": [
                {"BlockType": "PAGE", "Id": "p1", "Page": 1},
                {"BlockType": "LINE", "Id": "l1", "Page": 1, "Text": "Hello",
                 "Geometry": {"BoundingBox": {"Width": 0.3, "Height": 0.02, "Left": 0.1, "Top": 0.1}}}
            ]
        }"#;
        let doc = Document::from_json_str(json).unwrap();
        assert_eq!(doc.page_count(), 4);
        assert_eq!(doc.fragments.len(), 2);
        assert_eq!(doc.kind_counts().get("LINE"), Some(&1));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(Document::from_json_str("not json").is_err());
    }
}
