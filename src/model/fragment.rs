//! OCR fragment types.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// One element detected by the OCR engine.
///
/// Every fragment shares the same header (identifier, page, geometry,
/// relationships); what differs per element type lives in [`FragmentKind`].
/// Relationships hold identifiers only and are resolved through a
/// page-scoped [`BlockIndex`](crate::reconstruct::BlockIndex).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Identifier, unique within the document
    pub id: String,

    /// Page number (1-indexed)
    pub page: u32,

    /// Location on the page
    pub bbox: BoundingBox,

    /// Typed payload
    pub kind: FragmentKind,

    /// Outgoing references, grouped by relationship type, in stored order
    pub relationships: Vec<Relationship>,
}

impl Fragment {
    /// Create a fragment without relationships.
    pub fn new(id: impl Into<String>, page: u32, bbox: BoundingBox, kind: FragmentKind) -> Self {
        Self {
            id: id.into(),
            page,
            bbox,
            kind,
            relationships: Vec::new(),
        }
    }

    /// Create a LINE fragment.
    pub fn line(id: impl Into<String>, page: u32, bbox: BoundingBox, text: impl Into<String>) -> Self {
        Self::new(id, page, bbox, FragmentKind::Line { text: text.into() })
    }

    /// Create a WORD fragment.
    pub fn word(id: impl Into<String>, page: u32, bbox: BoundingBox, text: impl Into<String>) -> Self {
        Self::new(id, page, bbox, FragmentKind::Word { text: text.into() })
    }

    /// Create a SELECTION_ELEMENT fragment.
    pub fn selection(id: impl Into<String>, page: u32, bbox: BoundingBox, selected: bool) -> Self {
        let status = if selected {
            SelectionStatus::Selected
        } else {
            SelectionStatus::NotSelected
        };
        Self::new(id, page, bbox, FragmentKind::SelectionElement { status })
    }

    /// Create a TABLE CELL fragment.
    pub fn cell(id: impl Into<String>, page: u32, bbox: BoundingBox, row: u32, column: u32) -> Self {
        Self::new(id, page, bbox, FragmentKind::Cell { row, column })
    }

    /// Add a relationship group and return self.
    pub fn with_relationship<I, S>(mut self, kind: RelationshipKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relationships.push(Relationship::new(kind, ids));
        self
    }

    /// Add a CHILD relationship group and return self.
    pub fn with_children<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_relationship(RelationshipKind::Child, ids)
    }

    /// Identifiers in CHILD relationships, in stored order.
    pub fn child_ids(&self) -> impl Iterator<Item = &str> {
        self.ids_of(RelationshipKind::Child)
    }

    /// Identifiers in VALUE relationships, in stored order.
    pub fn value_ids(&self) -> impl Iterator<Item = &str> {
        self.ids_of(RelationshipKind::Value)
    }

    /// Every referenced identifier, regardless of relationship type.
    pub fn related_ids(&self) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    fn ids_of(&self, kind: RelationshipKind) -> impl Iterator<Item = &str> {
        self.relationships
            .iter()
            .filter(move |r| r.kind == kind)
            .flat_map(|r| r.ids.iter().map(String::as_str))
    }

    /// Text carried by LINE and WORD fragments.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            FragmentKind::Line { text } | FragmentKind::Word { text } => Some(text),
            _ => None,
        }
    }

    /// Check if this is a LINE fragment.
    pub fn is_line(&self) -> bool {
        matches!(self.kind, FragmentKind::Line { .. })
    }

    /// Check if this is a KEY fragment.
    pub fn is_key(&self) -> bool {
        matches!(self.kind, FragmentKind::Key)
    }

    /// Check if this is a VALUE fragment.
    pub fn is_value(&self) -> bool {
        matches!(self.kind, FragmentKind::Value)
    }

    /// Check if this is a TABLE fragment.
    pub fn is_table(&self) -> bool {
        matches!(self.kind, FragmentKind::Table)
    }

    /// Check if this fragment is part of form or table structure.
    ///
    /// These are the fragments whose text must not be repeated as a
    /// standalone line.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            FragmentKind::Key
                | FragmentKind::Value
                | FragmentKind::Table
                | FragmentKind::Cell { .. }
                | FragmentKind::SelectionElement { .. }
        )
    }
}

/// Typed payload of a fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FragmentKind {
    /// Page container
    Page,

    /// A line of text
    Line {
        /// Line text
        text: String,
    },

    /// A single word
    Word {
        /// Word text
        text: String,
    },

    /// A checkbox or radio button
    SelectionElement {
        /// Whether the element is marked
        status: SelectionStatus,
    },

    /// The key half of a form field
    Key,

    /// The value half of a form field
    Value,

    /// A table
    Table,

    /// A table cell (1-indexed row and column)
    Cell {
        /// Row index
        row: u32,
        /// Column index
        column: u32,
    },

    /// Any other block type, kept but ignored during reconstruction
    Other {
        /// Block type as reported by the OCR service
        block_type: String,
    },
}

impl FragmentKind {
    /// Short name used in logs and statistics.
    pub fn name(&self) -> &str {
        match self {
            FragmentKind::Page => "PAGE",
            FragmentKind::Line { .. } => "LINE",
            FragmentKind::Word { .. } => "WORD",
            FragmentKind::SelectionElement { .. } => "SELECTION_ELEMENT",
            FragmentKind::Key => "KEY",
            FragmentKind::Value => "VALUE",
            FragmentKind::Table => "TABLE",
            FragmentKind::Cell { .. } => "CELL",
            FragmentKind::Other { block_type } => block_type,
        }
    }
}

/// State of a selection element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionStatus {
    /// Marked
    Selected,
    /// Not marked
    NotSelected,
}

/// A group of references sharing one relationship type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Relationship type
    pub kind: RelationshipKind,

    /// Referenced identifiers, in stored order
    pub ids: Vec<String>,
}

impl Relationship {
    /// Create a relationship group.
    pub fn new<I, S>(kind: RelationshipKind, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Relationship type between fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Structural containment (line → words, cell → words, table → cells)
    Child,

    /// Key → value binding
    Value,

    /// Any other relationship type
    Other(String),
}

impl RelationshipKind {
    /// Map the wire name of a relationship type.
    pub fn from_wire(name: &str) -> Self {
        match name {
            "CHILD" => RelationshipKind::Child,
            "VALUE" => RelationshipKind::Value,
            other => RelationshipKind::Other(other.to_string()),
        }
    }
}
