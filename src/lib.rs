//! # unocr
//!
//! Layout reconstruction for OCR document-analysis output.
//!
//! An OCR service returns a flat list of blocks per document: lines, words,
//! form keys and values, tables, cells and checkboxes, each with a page
//! number, a bounding box and references to other blocks. This library
//! turns that list into page-ordered sections: every standalone line of
//! text, followed by the key-value pairs and tables found between it and
//! the next line.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unocr::{load_file, render, Reconstructor};
//!
//! fn main() -> unocr::Result<()> {
//!     // Load an analysis response
//!     let doc = load_file("analysis.json")?;
//!
//!     // Rebuild sections for every page
//!     let reconstruction = Reconstructor::new().reconstruct(&doc)?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     println!("{}", render::to_markdown(&reconstruction, &options)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed fragments**: the response's blocks become a tagged enum
//! - **Form and table association**: by vertical band below each line
//! - **Paginated responses**: several response pages merge into one document
//! - **Parallel processing**: uses Rayon across pages
//! - **Output formats**: structured or keyed JSON, Markdown, plain text

pub mod error;
pub mod model;
pub mod reconstruct;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    AnalysisResponse, Band, BoundingBox, Document, Fragment, FragmentKind, KeyValueMap,
    PageContent, Reconstruction, ReconstructionRecord, ReconstructionStats, Section, Table,
};
pub use reconstruct::{ErrorMode, LineOrder, ReconstructOptions, Reconstructor};
pub use render::{JsonFormat, JsonShape, PageSelection, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Load an analysis response from a JSON file.
///
/// # Example
///
/// ```no_run
/// use unocr::load_file;
///
/// let doc = load_file("analysis.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let data = std::fs::read(path)?;
    Document::from_json_slice(&data)
}

/// Load the pages of a paginated response, one JSON file per page, in order.
///
/// # Example
///
/// ```no_run
/// use unocr::load_files;
///
/// let doc = load_files(["part-1.json", "part-2.json"]).unwrap();
/// ```
pub fn load_files<I, P>(paths: I) -> Result<Document>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut responses = Vec::new();
    for path in paths {
        let data = std::fs::read(path)?;
        responses.push(serde_json::from_slice::<AnalysisResponse>(&data)?);
    }
    Document::from_responses(responses)
}

/// Load an analysis response from JSON bytes.
pub fn load_bytes(data: &[u8]) -> Result<Document> {
    Document::from_json_slice(data)
}

/// Load an analysis response from a reader.
pub fn load_reader<R: Read>(mut reader: R) -> Result<Document> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Document::from_json_slice(&data)
}

/// Reconstruct every page of a document with default options.
pub fn reconstruct(doc: &Document) -> Result<Reconstruction> {
    Reconstructor::new().reconstruct(doc)
}

/// Load a response file and reconstruct every page.
///
/// # Example
///
/// ```no_run
/// use unocr::reconstruct_file;
///
/// let reconstruction = reconstruct_file("analysis.json").unwrap();
/// for page in &reconstruction.pages {
///     println!("page {}: {} sections", page.page, page.section_count());
/// }
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P) -> Result<Reconstruction> {
    let doc = load_file(path)?;
    reconstruct(&doc)
}

/// Convert a response file to Markdown.
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let reconstruction = reconstruct_file(path)?;
    render::to_markdown(&reconstruction, &RenderOptions::default())
}

/// Convert a response file to plain text.
pub fn to_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let reconstruction = reconstruct_file(path)?;
    render::to_text(&reconstruction, &RenderOptions::default())
}

/// Convert a response file to JSON.
///
/// # Example
///
/// ```no_run
/// use unocr::{to_json, JsonFormat};
///
/// let json = to_json("analysis.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("sections.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let reconstruction = reconstruct_file(path)?;
    render::to_json(&reconstruction, format, &RenderOptions::default())
}

/// Builder for loading, reconstructing and rendering OCR output.
///
/// # Example
///
/// ```no_run
/// use unocr::{JsonFormat, JsonShape, Unocr};
///
/// let json = Unocr::new()
///     .lenient()
///     .positional()
///     .with_json_shape(JsonShape::Keyed)
///     .parse("analysis.json")?
///     .to_json(JsonFormat::Compact)?;
/// # Ok::<(), unocr::Error>(())
/// ```
pub struct Unocr {
    reconstruct_options: ReconstructOptions,
    render_options: RenderOptions,
}

impl Unocr {
    /// Create a new Unocr builder.
    pub fn new() -> Self {
        Self {
            reconstruct_options: ReconstructOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient mode.
    pub fn lenient(mut self) -> Self {
        self.reconstruct_options = self.reconstruct_options.lenient();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.reconstruct_options = self.reconstruct_options.sequential();
        self
    }

    /// Order lines by position instead of stored order.
    pub fn positional(mut self) -> Self {
        self.reconstruct_options = self.reconstruct_options.positional();
        self
    }

    /// Drop key-value pairs that sit inside tables.
    pub fn exclude_table_key_values(mut self) -> Self {
        self.reconstruct_options = self.reconstruct_options.with_table_key_values_excluded(true);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_shape(mut self, shape: JsonShape) -> Self {
        self.render_options = self.render_options.with_json_shape(shape);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.reconstruct_options = self.reconstruct_options.with_pages(pages.clone());
        self.render_options = self.render_options.with_pages(pages);
        self
    }

    /// Load a response file and reconstruct it.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnocrResult> {
        let document = load_file(path)?;
        self.reconstruct(document)
    }

    /// Load response bytes and reconstruct them.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnocrResult> {
        let document = load_bytes(data)?;
        self.reconstruct(document)
    }

    /// Reconstruct an already loaded document.
    pub fn reconstruct(self, document: Document) -> Result<UnocrResult> {
        let reconstruction =
            Reconstructor::with_options(self.reconstruct_options).reconstruct(&document)?;
        Ok(UnocrResult {
            document,
            reconstruction,
            render_options: self.render_options,
        })
    }
}

impl Default for Unocr {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reconstructing a document.
pub struct UnocrResult {
    /// The source document
    pub document: Document,
    /// The reconstructed pages
    pub reconstruction: Reconstruction,
    /// Render options to use
    render_options: RenderOptions,
}

impl UnocrResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.reconstruction, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.reconstruction, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.reconstruction, format, &self.render_options)
    }

    /// Wrap the reconstruction in a storage record.
    pub fn to_record(&self, id: impl Into<String>, file_path: impl Into<String>) -> ReconstructionRecord {
        ReconstructionRecord::new(id, file_path, self.reconstruction.clone())
    }

    /// Summary counts.
    pub fn stats(&self) -> ReconstructionStats {
        self.reconstruction.stats()
    }
}
