//! Wire schema of an OCR document-analysis response.
//!
//! Field names follow the service's JSON output (`Blocks`, `BlockType`,
//! `Geometry.BoundingBox`, ...). Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use super::{BoundingBox, Fragment, FragmentKind, Relationship, RelationshipKind, SelectionStatus};
use crate::error::{Error, Result};

/// One response (or one page of a paginated response) from the OCR service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResponse {
    /// Document-level metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_metadata: Option<DocumentMetadataWire>,

    /// Detected blocks
    #[serde(default)]
    pub blocks: Vec<BlockWire>,

    /// Continuation token when more results are pending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,

    /// Job status for asynchronous jobs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_status: Option<String>,
}

impl AnalysisResponse {
    /// Merge the pages of a paginated result into one response.
    ///
    /// Blocks are concatenated in order. Page count comes from the first
    /// response that reports one. The continuation token is dropped.
    pub fn merge<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = AnalysisResponse>,
    {
        let mut merged = AnalysisResponse::default();
        for response in responses {
            if merged.document_metadata.is_none() {
                merged.document_metadata = response.document_metadata;
            }
            if merged.job_status.is_none() {
                merged.job_status = response.job_status;
            }
            merged.blocks.extend(response.blocks);
        }
        merged
    }
}

/// `DocumentMetadata` object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DocumentMetadataWire {
    /// Number of pages in the analysed document
    pub pages: u32,
}

/// One entry of `Blocks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockWire {
    /// Block type (`LINE`, `WORD`, `KEY_VALUE_SET`, ...)
    pub block_type: String,

    /// Block identifier
    pub id: String,

    /// Page number; absent in single-page responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Location on the page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<GeometryWire>,

    /// Text of LINE and WORD blocks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// `SELECTED` or `NOT_SELECTED`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_status: Option<String>,

    /// `KEY` or `VALUE` on key-value blocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_types: Vec<String>,

    /// Outgoing relationships
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<RelationshipWire>,

    /// Row of a CELL block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,

    /// Column of a CELL block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_index: Option<u32>,

    /// Recognition confidence (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// `Geometry` object.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeometryWire {
    /// Axis-aligned box
    pub bounding_box: BoundingBoxWire,
}

/// `Geometry.BoundingBox` object.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BoundingBoxWire {
    /// Width as a page fraction
    pub width: f64,
    /// Height as a page fraction
    pub height: f64,
    /// Left edge as a page fraction
    pub left: f64,
    /// Top edge as a page fraction
    pub top: f64,
}

impl From<BoundingBoxWire> for BoundingBox {
    fn from(b: BoundingBoxWire) -> Self {
        BoundingBox::new(b.top, b.left, b.width, b.height)
    }
}

/// One entry of `Relationships`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelationshipWire {
    /// Relationship type (`CHILD`, `VALUE`, ...)
    #[serde(rename = "Type")]
    pub kind: String,

    /// Referenced block identifiers
    #[serde(default)]
    pub ids: Vec<String>,
}

impl TryFrom<BlockWire> for Fragment {
    type Error = Error;

    fn try_from(block: BlockWire) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidBlock {
            id: block.id.clone(),
            reason: reason.to_string(),
        };

        let kind = match block.block_type.as_str() {
            "PAGE" => FragmentKind::Page,
            "LINE" => FragmentKind::Line {
                text: block.text.clone().ok_or_else(|| invalid("LINE without text"))?,
            },
            "WORD" => FragmentKind::Word {
                text: block.text.clone().ok_or_else(|| invalid("WORD without text"))?,
            },
            "SELECTION_ELEMENT" => {
                let status = match block.selection_status.as_deref() {
                    Some("SELECTED") => SelectionStatus::Selected,
                    Some("NOT_SELECTED") => SelectionStatus::NotSelected,
                    Some(other) => {
                        return Err(invalid(&format!("unknown selection status {}", other)))
                    }
                    None => return Err(invalid("SELECTION_ELEMENT without status")),
                };
                FragmentKind::SelectionElement { status }
            }
            "KEY_VALUE_SET" => {
                if block.entity_types.iter().any(|t| t == "KEY") {
                    FragmentKind::Key
                } else {
                    FragmentKind::Value
                }
            }
            "KEY" => FragmentKind::Key,
            "VALUE" => FragmentKind::Value,
            "TABLE" => FragmentKind::Table,
            "CELL" => match (block.row_index, block.column_index) {
                (Some(row), Some(column)) => FragmentKind::Cell { row, column },
                _ => return Err(invalid("CELL without row or column index")),
            },
            other => FragmentKind::Other {
                block_type: other.to_string(),
            },
        };

        let bbox = match (&kind, block.geometry) {
            (_, Some(geometry)) => geometry.bounding_box.into(),
            (FragmentKind::Page | FragmentKind::Other { .. }, None) => BoundingBox::default(),
            (_, None) => return Err(invalid("missing geometry")),
        };

        let relationships = block
            .relationships
            .into_iter()
            .map(|r| Relationship {
                kind: RelationshipKind::from_wire(&r.kind),
                ids: r.ids,
            })
            .collect();

        Ok(Fragment {
            id: block.id,
            page: block.page.unwrap_or(1),
            bbox,
            kind,
            relationships,
        })
    }
}
