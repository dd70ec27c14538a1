//! Page-scoped fragment lookup.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{Document, Fragment};

/// Fragments of one page, addressable by identifier.
///
/// Fragments are kept in stored order in an arena; identifiers map to
/// arena slots. A repeated identifier resolves to its last occurrence.
#[derive(Debug)]
pub struct BlockIndex<'a> {
    page: u32,
    fragments: Vec<&'a Fragment>,
    slots: HashMap<&'a str, usize>,
}

impl<'a> BlockIndex<'a> {
    /// Index the fragments of `page`.
    pub fn build(doc: &'a Document, page: u32) -> Self {
        let fragments: Vec<&'a Fragment> = doc.fragments_on(page).collect();
        let mut slots = HashMap::with_capacity(fragments.len());
        for (slot, fragment) in fragments.iter().enumerate() {
            slots.insert(fragment.id.as_str(), slot);
        }
        Self {
            page,
            fragments,
            slots,
        }
    }

    /// Page this index covers.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Look up a fragment by identifier.
    pub fn get(&self, id: &str) -> Option<&'a Fragment> {
        self.slots.get(id).map(|&slot| self.fragments[slot])
    }

    /// Look up a fragment that must exist on this page.
    pub fn resolve(&self, id: &str) -> Result<&'a Fragment> {
        self.get(id).ok_or_else(|| Error::DanglingReference {
            id: id.to_string(),
            page: self.page,
        })
    }

    /// Check whether an identifier is on this page.
    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Fragments in stored order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Fragment> + '_ {
        self.fragments.iter().copied()
    }

    /// Number of fragments on the page.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Check if the page has no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn doc() -> Document {
        let bbox = BoundingBox::new(0.1, 0.1, 0.1, 0.1);
        Document::from_fragments(vec![
            Fragment::line("l1", 1, bbox, "one"),
            Fragment::line("l2", 2, bbox, "two"),
            Fragment::word("w1", 1, bbox, "one"),
        ])
    }

    #[test]
    fn test_index_is_page_scoped() {
        let doc = doc();
        let index = BlockIndex::build(&doc, 1);

        assert_eq!(index.len(), 2);
        assert!(index.contains("l1"));
        assert!(!index.contains("l2"));
        assert_eq!(
            index.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
            vec!["l1", "w1"]
        );
    }

    #[test]
    fn test_resolve_missing_is_dangling() {
        let doc = doc();
        let index = BlockIndex::build(&doc, 1);

        let err = index.resolve("l2").unwrap_err();
        assert!(matches!(err, Error::DanglingReference { ref id, page: 1 } if id == "l2"));
    }

    #[test]
    fn test_empty_page() {
        let doc = doc();
        let index = BlockIndex::build(&doc, 7);
        assert!(index.is_empty());
        assert_eq!(index.page(), 7);
    }
}
