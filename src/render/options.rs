//! Rendering options and configuration.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for rendering reconstructed content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page selection
    pub page_selection: PageSelection,

    /// Layout of JSON output
    pub json_shape: JsonShape,

    /// Render sections that carry no key-value pairs or tables
    pub include_plain_sections: bool,

    /// Separate pages with a horizontal rule in Markdown output
    pub page_separators: bool,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, selection: PageSelection) -> Self {
        self.page_selection = selection;
        self
    }

    /// Set specific page range.
    pub fn with_page_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.page_selection = PageSelection::Range(range);
        self
    }

    /// Set specific pages.
    pub fn with_page_list(mut self, pages: Vec<u32>) -> Self {
        self.page_selection = PageSelection::Pages(pages);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_shape(mut self, shape: JsonShape) -> Self {
        self.json_shape = shape;
        self
    }

    /// Enable or disable rendering of sections without structure.
    pub fn with_plain_sections(mut self, include: bool) -> Self {
        self.include_plain_sections = include;
        self
    }

    /// Enable or disable page separators.
    pub fn with_page_separators(mut self, separators: bool) -> Self {
        self.page_separators = separators;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_selection: PageSelection::All,
            json_shape: JsonShape::Structured,
            include_plain_sections: true,
            page_separators: true,
            escape_special_chars: true,
        }
    }
}

/// Layout of JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonShape {
    /// Typed structure: pages with named section fields and geometry
    #[default]
    Structured,
    /// Storage layout: `[{"Page": n, "Content": [{"<line>": {"KeyValue": .., "Tables": ..}}]}]`
    Keyed,
}

/// Page selection for reconstruction and rendering.
#[derive(Debug, Clone, Default)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed)
    Pages(Vec<u32>),
    /// Several disjoint ranges, sorted (inclusive, 1-indexed)
    Ranges(Vec<RangeInclusive<u32>>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
            PageSelection::Ranges(ranges) => ranges.iter().any(|r| r.contains(&page)),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        // Simple range (e.g., "1-10")
        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = parse_range(start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut ranges = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_range(start, end)?;
                ranges.push(start..=end);
            } else {
                let p = parse_page(part)?;
                ranges.push(p..=p);
            }
        }

        // Sort and merge so overlapping or adjacent parts collapse
        ranges.sort_unstable_by_key(|r| *r.start());
        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    if range.end() > last.end() {
                        *last = *last.start()..=*range.end();
                    }
                }
                _ => merged.push(range),
            }
        }

        if merged.iter().all(|r| r.start() == r.end()) {
            Ok(PageSelection::Pages(merged.iter().map(|r| *r.start()).collect()))
        } else {
            Ok(PageSelection::Ranges(merged))
        }
    }
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(format!(
            "invalid page number {:?}",
            s.trim()
        ))),
        Ok(p) => Ok(p),
    }
}

fn parse_range(start: &str, end: &str) -> Result<(u32, u32)> {
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(Error::InvalidPageRange(format!("{}-{} is reversed", start, end)));
    }
    Ok((start, end))
}
