//! Plain text rendering for reconstructed documents.

use crate::error::Result;
use crate::model::Reconstruction;

use super::RenderOptions;

/// Convert a reconstruction to plain text.
///
/// Each section prints its line, then `key: value` lines, then table rows
/// with tab-separated cells. Pages are separated by a blank line.
pub fn to_text(reconstruction: &Reconstruction, options: &RenderOptions) -> Result<String> {
    let mut pages = Vec::new();

    for page in &reconstruction.pages {
        if !options.page_selection.includes(page.page) {
            continue;
        }

        let mut lines = Vec::new();
        for section in &page.sections {
            if section.is_plain() && !options.include_plain_sections {
                continue;
            }
            lines.push(section.line.trim_end().to_string());
            for (key, value) in &section.key_values {
                lines.push(format!("{}: {}", key.trim(), value.trim()));
            }
            for table in section.tables.iter().flatten() {
                lines.push(table.plain_text());
            }
        }
        pages.push(lines.join("\n"));
    }

    Ok(pages.join("\n\n").trim().to_string())
}
