//! Layout reconstruction.
//!
//! Turns the flat fragment list of an OCR analysis into page-ordered
//! sections. Each page is handled independently from a read-only view of
//! the document, so pages are reconstructed in parallel when enabled.

mod assembler;
mod exclusion;
mod index;
mod key_value;
mod options;
mod tables;
mod text;

pub use assembler::PageAssembler;
pub use exclusion::{standalone_lines, ExclusionSet};
pub use index::BlockIndex;
pub use key_value::{find_value, key_values_in_band, key_values_outside_tables};
pub use options::{ErrorMode, LineOrder, ReconstructOptions};
pub use tables::{build_table, table_boxes_in_band, tables_in_band};
pub use text::extract_text;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::model::{Document, PageContent, PageFailure, Reconstruction};

/// Reconstructs sections for the pages of a document.
#[derive(Debug, Clone, Default)]
pub struct Reconstructor {
    options: ReconstructOptions,
}

impl Reconstructor {
    /// Create a reconstructor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with custom options.
    pub fn with_options(options: ReconstructOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ReconstructOptions {
        &self.options
    }

    /// Reconstruct a single page.
    pub fn reconstruct_page(&self, doc: &Document, page: u32) -> Result<PageContent> {
        if page == 0 || page > doc.page_count() {
            return Err(Error::PageOutOfRange(page, doc.page_count()));
        }
        PageAssembler::new(doc, page, &self.options).assemble()
    }

    /// Reconstruct every selected page.
    ///
    /// In strict mode the failure with the lowest page number is returned.
    /// In lenient mode failed pages are logged, recorded in
    /// [`Reconstruction::failures`] and left out of the output.
    pub fn reconstruct(&self, doc: &Document) -> Result<Reconstruction> {
        let pages: Vec<u32> = (1..=doc.page_count())
            .filter(|&p| self.options.pages.includes(p))
            .collect();

        let results: Vec<(u32, Result<PageContent>)> = if self.options.parallel {
            pages
                .par_iter()
                .map(|&p| (p, self.reconstruct_page(doc, p)))
                .collect()
        } else {
            pages
                .iter()
                .map(|&p| (p, self.reconstruct_page(doc, p)))
                .collect()
        };

        let mut reconstruction = Reconstruction::new(doc.page_count());
        for (page, result) in results {
            match result {
                Ok(content) => reconstruction.pages.push(content),
                Err(e) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(e);
                    }
                    log::warn!("Failed to reconstruct page {}: {}", page, e);
                    reconstruction.failures.push(PageFailure {
                        page,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(reconstruction)
    }
}
