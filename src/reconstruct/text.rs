//! Text of structural fragments.

use crate::error::Result;
use crate::model::{Fragment, FragmentKind, SelectionStatus};

use super::BlockIndex;

/// Render a KEY, VALUE or CELL fragment as text.
///
/// Walks the CHILD references in stored order. Each WORD contributes its
/// text plus one space, each selected SELECTION_ELEMENT contributes `"X "`,
/// unselected ones and other child types contribute nothing. The trailing
/// space is kept.
pub fn extract_text(fragment: &Fragment, index: &BlockIndex<'_>) -> Result<String> {
    let mut text = String::new();
    for id in fragment.child_ids() {
        match &index.resolve(id)?.kind {
            FragmentKind::Word { text: word } => {
                text.push_str(word);
                text.push(' ');
            }
            FragmentKind::SelectionElement {
                status: SelectionStatus::Selected,
            } => text.push_str("X "),
            _ => {}
        }
    }
    Ok(text)
}
