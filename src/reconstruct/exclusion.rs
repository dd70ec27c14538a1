//! Lines that belong to form or table structure.

use std::collections::HashSet;

use crate::model::Fragment;

use super::BlockIndex;

/// Identifiers taken by key-value, table and selection structure on a page.
///
/// Holds every structural fragment's own identifier plus the identifiers it
/// references directly. References are followed one hop only.
#[derive(Debug, Default)]
pub struct ExclusionSet<'a> {
    ids: HashSet<&'a str>,
}

impl<'a> ExclusionSet<'a> {
    /// Collect the structural identifiers of a page.
    pub fn build(index: &BlockIndex<'a>) -> Self {
        let mut ids = HashSet::new();
        for fragment in index.iter().filter(|f| f.is_structural()) {
            ids.insert(fragment.id.as_str());
            ids.extend(fragment.related_ids());
        }
        Self { ids }
    }

    /// Check whether an identifier is taken by structure.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Check whether a line is part of structure, through its own identifier
    /// or any identifier it references.
    pub fn excludes(&self, line: &Fragment) -> bool {
        self.contains(&line.id) || line.related_ids().any(|id| self.contains(id))
    }

    /// Number of identifiers in the set.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the page has no structure.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// LINE fragments of a page that are not part of any structure, in stored
/// order.
pub fn standalone_lines<'a>(index: &BlockIndex<'a>, exclusions: &ExclusionSet<'_>) -> Vec<&'a Fragment> {
    index
        .iter()
        .filter(|f| f.is_line() && !exclusions.excludes(f))
        .collect()
}
