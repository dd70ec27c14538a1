//! Key-value pairs inside a band.

use crate::error::{Error, Result};
use crate::model::{Band, BoundingBox, Fragment, KeyValueMap};

use super::{extract_text, BlockIndex};

/// Find the VALUE fragment bound to a KEY fragment.
///
/// Uses the first identifier of the first VALUE relationship. A key without
/// any VALUE relationship is an error, as is a binding to an identifier that
/// is not a VALUE fragment on the same page.
pub fn find_value<'a>(key: &Fragment, index: &BlockIndex<'a>) -> Result<&'a Fragment> {
    let value_id = key.value_ids().next().ok_or_else(|| Error::MissingValue {
        key_id: key.id.clone(),
        page: index.page(),
    })?;

    match index.get(value_id) {
        Some(value) if value.is_value() => Ok(value),
        _ => Err(Error::DanglingReference {
            id: value_id.to_string(),
            page: index.page(),
        }),
    }
}

/// Collect key-value pairs whose value box lies vertically inside `band`.
///
/// Every key on the page is resolved, so a malformed pair fails the page
/// even when it lies outside the band.
pub fn key_values_in_band(index: &BlockIndex<'_>, band: Band) -> Result<KeyValueMap> {
    collect_key_values(index, band, &[])
}

/// Like [`key_values_in_band`], but drops pairs whose value box sits inside
/// one of the band's tables.
pub fn key_values_outside_tables(index: &BlockIndex<'_>, band: Band) -> Result<KeyValueMap> {
    let tables = super::table_boxes_in_band(index, band).unwrap_or_default();
    collect_key_values(index, band, &tables)
}

fn collect_key_values(
    index: &BlockIndex<'_>,
    band: Band,
    excluded: &[BoundingBox],
) -> Result<KeyValueMap> {
    let mut pairs = KeyValueMap::new();
    for key in index.iter().filter(|f| f.is_key()) {
        let value = find_value(key, index)?;
        let key_text = extract_text(key, index)?;
        let value_text = extract_text(value, index)?;

        if !band.contains(&value.bbox) {
            continue;
        }
        if excluded.iter().any(|table| value.bbox.is_within(table)) {
            log::debug!("Page {}: value {} lies in a table", index.page(), value.id);
            continue;
        }
        pairs.insert(key_text, value_text);
    }
    Ok(pairs)
}
