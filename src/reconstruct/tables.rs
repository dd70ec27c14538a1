//! Tables inside a band.

use crate::error::Result;
use crate::model::{Band, BoundingBox, Fragment, FragmentKind, Table, TableBuilder};

use super::{extract_text, BlockIndex};

/// Build the tables whose box lies vertically inside `band`.
///
/// Returns `None` when no table qualifies, never an empty list.
pub fn tables_in_band(index: &BlockIndex<'_>, band: Band) -> Result<Option<Vec<Table>>> {
    let tables = qualifying_tables(index, band)
        .map(|table| build_table(table, index))
        .collect::<Result<Vec<_>>>()?;

    if tables.is_empty() {
        Ok(None)
    } else {
        Ok(Some(tables))
    }
}

/// Boxes of the tables whose box lies vertically inside `band`.
///
/// Returns `None` when no table qualifies.
pub fn table_boxes_in_band(index: &BlockIndex<'_>, band: Band) -> Option<Vec<BoundingBox>> {
    let boxes: Vec<BoundingBox> = qualifying_tables(index, band).map(|t| t.bbox).collect();
    if boxes.is_empty() {
        None
    } else {
        Some(boxes)
    }
}

fn qualifying_tables<'a, 'i>(
    index: &'i BlockIndex<'a>,
    band: Band,
) -> impl Iterator<Item = &'a Fragment> + 'i {
    index
        .iter()
        .filter(move |f| f.is_table() && band.contains(&f.bbox))
}

/// Lay out the CELL children of a TABLE fragment as rows of text.
pub fn build_table(table: &Fragment, index: &BlockIndex<'_>) -> Result<Table> {
    let mut builder = TableBuilder::new();
    for id in table.child_ids() {
        let child = index.resolve(id)?;
        if let FragmentKind::Cell { row, column } = child.kind {
            builder.insert(row, column, extract_text(child, index)?);
        }
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::Document;

    fn cell(id: &str, row: u32, column: u32, word: &str) -> Fragment {
        Fragment::cell(id, 1, BoundingBox::new(0.3, 0.1, 0.1, 0.05), row, column).with_children([word])
    }

    fn word(id: &str, text: &str) -> Fragment {
        Fragment::word(id, 1, BoundingBox::new(0.3, 0.1, 0.05, 0.02), text)
    }

    fn table_doc() -> Document {
        Document::from_fragments(vec![
            Fragment::new("t", 1, BoundingBox::new(0.25, 0.0, 1.0, 0.25), FragmentKind::Table)
                .with_children(["c22", "c11", "c21", "c12"]),
            cell("c11", 1, 1, "w11"),
            cell("c12", 1, 2, "w12"),
            cell("c21", 2, 1, "w21"),
            cell("c22", 2, 2, "w22"),
            word("w11", "Item"),
            word("w12", "Qty"),
            word("w21", "Bolt"),
            word("w22", "4"),
        ])
    }

    #[test]
    fn test_table_in_band() {
        let doc = table_doc();
        let index = BlockIndex::build(&doc, 1);

        let tables = tables_in_band(&index, Band::new(0.25, 0.5)).unwrap().unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(
            tables[0],
            Table::from_rows([vec!["Item ", "Qty "], vec!["Bolt ", "4 "]])
        );
    }

    #[test]
    fn test_no_table_is_none() {
        let doc = table_doc();
        let index = BlockIndex::build(&doc, 1);

        assert_eq!(tables_in_band(&index, Band::new(0.3, 1.0)).unwrap(), None);
        assert_eq!(tables_in_band(&index, Band::new(0.0, 0.4)).unwrap(), None);
        assert_eq!(table_boxes_in_band(&index, Band::new(0.0, 0.4)), None);
    }

    #[test]
    fn test_table_boxes() {
        let doc = table_doc();
        let index = BlockIndex::build(&doc, 1);

        let boxes = table_boxes_in_band(&index, Band::new(0.0, 1.0)).unwrap();
        assert_eq!(boxes, vec![BoundingBox::new(0.25, 0.0, 1.0, 0.25)]);
    }

    #[test]
    fn test_non_cell_children_ignored() {
        let doc = Document::from_fragments(vec![
            Fragment::new("t", 1, BoundingBox::new(0.1, 0.0, 1.0, 0.1), FragmentKind::Table)
                .with_children(["c11", "w"]),
            cell("c11", 1, 1, "w"),
            word("w", "Only"),
        ]);
        let index = BlockIndex::build(&doc, 1);
        let table = build_table(index.resolve("t").unwrap(), &index).unwrap();
        assert_eq!(table, Table::from_rows([vec!["Only "]]));
    }

    #[test]
    fn test_dangling_cell_fails() {
        let doc = Document::from_fragments(vec![
            Fragment::new("t", 1, BoundingBox::new(0.1, 0.0, 1.0, 0.1), FragmentKind::Table)
                .with_children(["missing"]),
        ]);
        let index = BlockIndex::build(&doc, 1);
        assert!(matches!(
            tables_in_band(&index, Band::new(0.0, 1.0)),
            Err(Error::DanglingReference { .. })
        ));
    }
}
