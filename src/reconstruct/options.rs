//! Reconstruction options and configuration.

use crate::render::PageSelection;

/// Options for reconstructing documents.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// How standalone lines are ordered before pairing them into bands
    pub line_order: LineOrder,

    /// Whether to use parallel processing across pages
    pub parallel: bool,

    /// Page selection (which pages to reconstruct)
    pub pages: PageSelection,

    /// Drop key-value pairs whose value sits inside a table of the same band
    pub exclude_table_key_values: bool,

    /// Lower bound of the last band on each page
    pub page_bottom: f64,
}

impl ReconstructOptions {
    /// Create new reconstruct options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (record failed pages and continue).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Set line order.
    pub fn with_line_order(mut self, order: LineOrder) -> Self {
        self.line_order = order;
        self
    }

    /// Order lines by position instead of stored order.
    pub fn positional(mut self) -> Self {
        self.line_order = LineOrder::Positional;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable dropping key-value pairs that sit inside tables.
    pub fn with_table_key_values_excluded(mut self, exclude: bool) -> Self {
        self.exclude_table_key_values = exclude;
        self
    }

    /// Set the lower bound of the last band.
    pub fn with_page_bottom(mut self, bottom: f64) -> Self {
        self.page_bottom = bottom;
        self
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            line_order: LineOrder::Stored,
            parallel: true,
            pages: PageSelection::All,
            exclude_table_key_values: false,
            page_bottom: 1.0,
        }
    }
}

/// Error handling mode during reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first broken page
    #[default]
    Strict,
    /// Record broken pages and keep the rest
    Lenient,
}

/// Order in which standalone lines are paired into bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineOrder {
    /// The order the OCR service returned them in
    #[default]
    Stored,
    /// Top to bottom, then left to right (stable for ties)
    Positional,
}
