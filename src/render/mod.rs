//! Rendering module for converting reconstructions to output formats.

mod json;
mod markdown;
mod options;
mod text;

pub use json::{keyed_page, keyed_section, record_to_json, to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{JsonShape, PageSelection, RenderOptions};
pub use text::to_text;
