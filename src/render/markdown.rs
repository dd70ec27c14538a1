//! Markdown rendering for reconstructed documents.

use crate::error::Result;
use crate::model::{PageContent, Reconstruction, Section, Table};

use super::RenderOptions;

/// Convert a reconstruction to Markdown.
pub fn to_markdown(reconstruction: &Reconstruction, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(reconstruction)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a reconstruction to Markdown.
    pub fn render(&self, reconstruction: &Reconstruction) -> Result<String> {
        let mut output = String::new();

        let mut first = true;
        for page in &reconstruction.pages {
            if !self.options.page_selection.includes(page.page) {
                continue;
            }
            if !first && self.options.page_separators {
                output.push_str("---\n\n");
            }
            first = false;
            self.render_page(&mut output, page);
        }

        Ok(output.trim().to_string())
    }

    fn render_page(&self, output: &mut String, page: &PageContent) {
        for section in &page.sections {
            if section.is_plain() && !self.options.include_plain_sections {
                continue;
            }
            self.render_section(output, section);
        }
    }

    fn render_section(&self, output: &mut String, section: &Section) {
        let line = self.escape(section.line.trim());
        if !line.is_empty() {
            output.push_str(&line);
            output.push_str("\n\n");
        }

        if !section.key_values.is_empty() {
            for (key, value) in &section.key_values {
                output.push_str(&format!(
                    "- **{}**: {}\n",
                    self.escape(key.trim()),
                    self.escape(value.trim())
                ));
            }
            output.push('\n');
        }

        for table in section.tables.iter().flatten() {
            self.render_table(output, table);
        }
    }

    fn render_table(&self, output: &mut String, table: &Table) {
        let col_count = table.column_count();
        if col_count == 0 {
            return;
        }

        for (i, row) in table.rows.iter().enumerate() {
            output.push('|');
            for col in 0..col_count {
                let content = row.get(col).map(|c| c.trim()).unwrap_or("");
                output.push_str(&format!(" {} |", escape_markdown(content)));
            }
            output.push('\n');

            // Separator after header row
            if i == 0 {
                output.push('|');
                for _ in 0..col_count {
                    output.push_str(" --- |");
                }
                output.push('\n');
            }
        }

        output.push('\n');
    }

    fn escape(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
/// Only escape characters that could be misinterpreted as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
