//! Data model for OCR input and reconstructed output.
//!
//! Input side: [`Document`] holds the typed [`Fragment`]s of an analysis,
//! built from the service's JSON ([`AnalysisResponse`]). Output side:
//! [`Reconstruction`] holds one [`PageContent`] per page, each a list of
//! [`Section`]s.

mod document;
mod fragment;
mod geometry;
mod page;
mod reconstruction;
mod response;
mod table;

pub use document::{Document, Metadata};
pub use fragment::{Fragment, FragmentKind, Relationship, RelationshipKind, SelectionStatus};
pub use geometry::{Band, BoundingBox};
pub use page::{KeyValueMap, PageContent, Section};
pub use reconstruction::{PageFailure, Reconstruction, ReconstructionRecord, ReconstructionStats};
pub use response::{
    AnalysisResponse, BlockWire, BoundingBoxWire, DocumentMetadataWire, GeometryWire,
    RelationshipWire,
};
pub use table::{Table, TableBuilder};
