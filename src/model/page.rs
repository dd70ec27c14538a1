//! Page-level output types.

use super::{Band, BoundingBox, Table};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key text to value text, in the order keys were found.
///
/// A key whose text repeats on the page overwrites the earlier value and
/// keeps the earlier position.
pub type KeyValueMap = IndexMap<String, String>;

/// Reconstructed content of one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub page: u32,

    /// Sections in reading order
    pub sections: Vec<Section>,
}

impl PageContent {
    /// Create an empty page.
    pub fn new(page: u32) -> Self {
        Self {
            page,
            sections: Vec::new(),
        }
    }

    /// Add a section to the page.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Check if the page has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Get the number of sections on the page.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Total key-value pairs over all sections.
    pub fn key_value_count(&self) -> usize {
        self.sections.iter().map(|s| s.key_values.len()).sum()
    }

    /// Total tables over all sections.
    pub fn table_count(&self) -> usize {
        self.sections.iter().map(Section::table_count).sum()
    }

    /// Get plain text content of the page (section lines only).
    pub fn plain_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.line.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One standalone line of text and the structure found below it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Text of the anchoring line
    pub line: String,

    /// Location of the anchoring line
    pub bbox: BoundingBox,

    /// Vertical range searched for key-value pairs and tables
    pub band: Band,

    /// Key-value pairs whose value lies in the band
    pub key_values: KeyValueMap,

    /// Tables inside the band; `None` when no table qualified
    pub tables: Option<Vec<Table>>,
}

impl Section {
    /// Create a section with no structured content.
    pub fn new(line: impl Into<String>, bbox: BoundingBox, band: Band) -> Self {
        Self {
            line: line.into(),
            bbox,
            band,
            key_values: KeyValueMap::new(),
            tables: None,
        }
    }

    /// Number of tables in the section.
    pub fn table_count(&self) -> usize {
        self.tables.as_ref().map_or(0, Vec::len)
    }

    /// Check if the section carries neither key-value pairs nor tables.
    pub fn is_plain(&self) -> bool {
        self.key_values.is_empty() && self.table_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(line: &str) -> Section {
        Section::new(line, BoundingBox::default(), Band::new(0.0, 1.0))
    }

    #[test]
    fn test_page_counts() {
        let mut page = PageContent::new(1);
        let mut first = section("Invoice");
        first.key_values.insert("Name ".into(), "ACME ".into());
        first.tables = Some(vec![Table::from_rows([vec!["a"]])]);
        page.add_section(first);
        page.add_section(section("Signature"));

        assert_eq!(page.section_count(), 2);
        assert_eq!(page.key_value_count(), 1);
        assert_eq!(page.table_count(), 1);
        assert_eq!(page.plain_text(), "Invoice\nSignature");
    }

    #[test]
    fn test_repeated_key_keeps_position() {
        let mut kv = KeyValueMap::new();
        kv.insert("A".into(), "1".into());
        kv.insert("B".into(), "2".into());
        kv.insert("A".into(), "3".into());
        assert_eq!(
            kv.iter().collect::<Vec<_>>(),
            vec![(&"A".to_string(), &"3".to_string()), (&"B".to_string(), &"2".to_string())]
        );
    }

    #[test]
    fn test_plain_section() {
        assert!(section("x").is_plain());
    }
}
