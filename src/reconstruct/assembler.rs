//! Page assembly: standalone lines, bands, sections.

use crate::error::Result;
use crate::model::{Band, Document, Fragment, PageContent, Section};

use super::{
    key_values_in_band, key_values_outside_tables, standalone_lines, tables_in_band, BlockIndex,
    ExclusionSet, LineOrder, ReconstructOptions,
};

/// Builds the sections of one page.
pub struct PageAssembler<'a> {
    index: BlockIndex<'a>,
    options: &'a ReconstructOptions,
}

impl<'a> PageAssembler<'a> {
    /// Prepare assembly of `page`.
    pub fn new(doc: &'a Document, page: u32, options: &'a ReconstructOptions) -> Self {
        Self {
            index: BlockIndex::build(doc, page),
            options,
        }
    }

    /// The page's fragment index.
    pub fn index(&self) -> &BlockIndex<'a> {
        &self.index
    }

    /// Standalone lines in the configured order.
    pub fn lines(&self) -> Vec<&'a Fragment> {
        let exclusions = ExclusionSet::build(&self.index);
        let mut lines = standalone_lines(&self.index, &exclusions);
        log::debug!(
            "Page {}: {} standalone lines, {} structural ids",
            self.index.page(),
            lines.len(),
            exclusions.len()
        );

        if self.options.line_order == LineOrder::Positional {
            lines.sort_by(|a, b| {
                a.bbox
                    .top
                    .total_cmp(&b.bbox.top)
                    .then(a.bbox.left.total_cmp(&b.bbox.left))
            });
        }
        lines
    }

    /// Bands for a sequence of lines.
    ///
    /// Each band runs from a line's top to the bottom of the next line; the
    /// last one runs to the configured page bottom.
    pub fn bands(&self, lines: &[&Fragment]) -> Vec<Band> {
        let mut bands: Vec<Band> = lines
            .windows(2)
            .map(|pair| Band::new(pair[0].bbox.top, pair[1].bbox.bottom()))
            .collect();
        if let Some(last) = lines.last() {
            bands.push(Band::new(last.bbox.top, self.options.page_bottom));
        }
        bands
    }

    /// Build the page's sections.
    pub fn assemble(&self) -> Result<PageContent> {
        let lines = self.lines();
        let bands = self.bands(&lines);

        let mut content = PageContent::new(self.index.page());
        for (line, band) in lines.into_iter().zip(bands) {
            let mut section = Section::new(line.text().unwrap_or_default(), line.bbox, band);
            section.key_values = if self.options.exclude_table_key_values {
                key_values_outside_tables(&self.index, band)?
            } else {
                key_values_in_band(&self.index, band)?
            };
            section.tables = tables_in_band(&self.index, band)?;
            content.add_section(section);
        }

        log::debug!(
            "Page {}: {} sections, {} key-values, {} tables",
            content.page,
            content.section_count(),
            content.key_value_count(),
            content.table_count()
        );
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, FragmentKind, RelationshipKind};

    fn line(id: &str, top: f64, left: f64, text: &str) -> Fragment {
        Fragment::line(id, 1, BoundingBox::new(top, left, 0.3, 0.02), text)
    }

    fn total_signature_doc() -> Document {
        Document::from_fragments(vec![
            line("l1", 0.5, 0.1, "Total:"),
            line("l2", 0.8, 0.1, "Signature"),
            Fragment::new("k", 1, BoundingBox::new(0.55, 0.1, 0.1, 0.02), FragmentKind::Key)
                .with_relationship(RelationshipKind::Value, ["v"])
                .with_children(["wk"]),
            Fragment::new("v", 1, BoundingBox::new(0.55, 0.3, 0.1, 0.02), FragmentKind::Value)
                .with_children(["wv"]),
            Fragment::word("wk", 1, BoundingBox::new(0.55, 0.1, 0.1, 0.02), "Amount"),
            Fragment::word("wv", 1, BoundingBox::new(0.55, 0.3, 0.1, 0.02), "$100"),
        ])
    }

    #[test]
    fn test_pair_goes_under_preceding_line() {
        let doc = total_signature_doc();
        let options = ReconstructOptions::default();
        let page = PageAssembler::new(&doc, 1, &options).assemble().unwrap();

        assert_eq!(page.section_count(), 2);
        assert_eq!(page.sections[0].line, "Total:");
        assert_eq!(page.sections[0].key_values.get("Amount "), Some(&"$100 ".to_string()));
        assert_eq!(page.sections[1].line, "Signature");
        assert!(page.sections[1].key_values.is_empty());
        assert_eq!(page.sections[1].tables, None);
    }

    #[test]
    fn test_bands() {
        let doc = total_signature_doc();
        let options = ReconstructOptions::default();
        let assembler = PageAssembler::new(&doc, 1, &options);
        let lines = assembler.lines();
        let bands = assembler.bands(&lines);

        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].top, 0.5);
        assert_eq!(bands[0].bottom, 0.8 + 0.02);
        assert_eq!(bands[1], Band::new(0.8, 1.0));
    }

    #[test]
    fn test_page_bottom_option() {
        let doc = total_signature_doc();
        let options = ReconstructOptions::new().with_page_bottom(0.9);
        let assembler = PageAssembler::new(&doc, 1, &options);
        let lines = assembler.lines();
        assert_eq!(assembler.bands(&lines)[1], Band::new(0.8, 0.9));
    }

    #[test]
    fn test_no_lines_no_sections() {
        let doc = Document::from_fragments(vec![Fragment::word(
            "w",
            1,
            BoundingBox::new(0.1, 0.1, 0.1, 0.1),
            "lonely",
        )]);
        let options = ReconstructOptions::default();
        let page = PageAssembler::new(&doc, 1, &options).assemble().unwrap();
        assert!(page.is_empty());
    }

    #[test]
    fn test_stored_and_positional_order() {
        let doc = Document::from_fragments(vec![
            line("low", 0.7, 0.1, "Footer"),
            line("right", 0.2, 0.6, "Date"),
            line("left", 0.2, 0.1, "Title"),
        ]);

        let stored = ReconstructOptions::default();
        let page = PageAssembler::new(&doc, 1, &stored).assemble().unwrap();
        let order: Vec<_> = page.sections.iter().map(|s| s.line.as_str()).collect();
        assert_eq!(order, vec!["Footer", "Date", "Title"]);

        let positional = ReconstructOptions::new().positional();
        let page = PageAssembler::new(&doc, 1, &positional).assemble().unwrap();
        let order: Vec<_> = page.sections.iter().map(|s| s.line.as_str()).collect();
        assert_eq!(order, vec!["Title", "Date", "Footer"]);
    }
}
