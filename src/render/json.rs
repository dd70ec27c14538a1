//! JSON rendering for reconstructed documents.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::model::{PageContent, Reconstruction, ReconstructionRecord, Section};

use super::{JsonShape, RenderOptions};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a reconstruction to JSON.
pub fn to_json(
    reconstruction: &Reconstruction,
    format: JsonFormat,
    options: &RenderOptions,
) -> Result<String> {
    let pages: Vec<&PageContent> = reconstruction
        .pages
        .iter()
        .filter(|p| options.page_selection.includes(p.page))
        .collect();

    match options.json_shape {
        JsonShape::Structured => {
            let selected = Reconstruction {
                page_count: reconstruction.page_count,
                pages: pages.into_iter().cloned().collect(),
                failures: reconstruction.failures.clone(),
            };
            serialize(&selected, format)
        }
        JsonShape::Keyed => {
            let value = Value::Array(pages.into_iter().map(keyed_page).collect());
            serialize(&value, format)
        }
    }
}

/// Convert a storage record to JSON.
pub fn record_to_json(record: &ReconstructionRecord, format: JsonFormat) -> Result<String> {
    serialize(record, format)
}

/// Storage layout of a page: `{"Page": n, "Content": [...]}`.
pub fn keyed_page(page: &PageContent) -> Value {
    json!({
        "Page": page.page,
        "Content": page.sections.iter().map(keyed_section).collect::<Vec<_>>(),
    })
}

/// Storage layout of a section: `{"<line>": {"KeyValue": {...}, "Tables": [...]|null}}`.
pub fn keyed_section(section: &Section) -> Value {
    let mut entry = Map::new();
    entry.insert(
        section.line.clone(),
        json!({
            "KeyValue": section.key_values,
            "Tables": section.tables,
        }),
    );
    Value::Object(entry)
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
