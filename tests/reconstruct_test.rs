//! Integration tests for layout reconstruction.

use std::path::PathBuf;

use unocr::model::{Fragment, RelationshipKind};
use unocr::{
    load_file, load_files, BoundingBox, Document, Error, FragmentKind, PageSelection,
    ReconstructOptions, Reconstructor, Table,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn invoice() -> Document {
    load_file(fixture("invoice.json")).unwrap()
}

#[test]
fn test_load_fixture() {
    let doc = invoice();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.fragments.len(), 45);

    let counts = doc.kind_counts();
    assert_eq!(counts.get("LINE"), Some(&11));
    assert_eq!(counts.get("CELL"), Some(&4));
}

#[test]
fn test_sections_in_stored_order() {
    let result = Reconstructor::new().reconstruct(&invoice()).unwrap();

    assert_eq!(result.page_count, 2);
    assert!(result.is_complete());

    let page1 = result.get_page(1).unwrap();
    let lines: Vec<&str> = page1.sections.iter().map(|s| s.line.as_str()).collect();
    assert_eq!(lines, vec!["INVOICE", "Items", "Payment", "Thank you"]);

    let page2 = result.get_page(2).unwrap();
    let lines: Vec<&str> = page2.sections.iter().map(|s| s.line.as_str()).collect();
    assert_eq!(lines, vec!["Notes", "Terms apply"]);
}

#[test]
fn test_key_values_attach_to_band() {
    let result = Reconstructor::new().reconstruct(&invoice()).unwrap();
    let page1 = result.get_page(1).unwrap();

    let header = &page1.sections[0];
    assert_eq!(header.key_values.len(), 1);
    assert_eq!(
        header.key_values.get("Customer: "),
        Some(&"ACME Corp ".to_string())
    );

    // Checkbox values render as "X "
    let payment = &page1.sections[2];
    assert_eq!(payment.key_values.get("Paid "), Some(&"X ".to_string()));

    assert!(page1.sections[3].key_values.is_empty());

    let terms = &result.get_page(2).unwrap().sections[1];
    assert_eq!(terms.key_values.get("Due "), Some(&"30 days ".to_string()));
}

#[test]
fn test_table_attaches_to_band() {
    let result = Reconstructor::new().reconstruct(&invoice()).unwrap();
    let page1 = result.get_page(1).unwrap();

    assert_eq!(page1.sections[0].tables, None);
    assert_eq!(
        page1.sections[1].tables,
        Some(vec![Table::from_rows([
            vec!["Item ", "Qty "],
            vec!["Bolt ", "4 "],
        ])])
    );
    assert_eq!(page1.sections[2].tables, None);
    assert_eq!(page1.table_count(), 1);
}

#[test]
fn test_bands_cover_next_line() {
    let result = Reconstructor::new().reconstruct(&invoice()).unwrap();
    let page1 = result.get_page(1).unwrap();

    let first = page1.sections[0].band;
    assert_eq!(first.top, 0.05);
    assert!((first.bottom - 0.27).abs() < 1e-9);

    let last = page1.sections[3].band;
    assert_eq!(last.top, 0.9);
    assert_eq!(last.bottom, 1.0);
}

#[test]
fn test_reconstruction_is_idempotent() {
    let doc = invoice();
    let reconstructor = Reconstructor::new();
    let first = reconstructor.reconstruct(&doc).unwrap();
    let second = reconstructor.reconstruct(&doc).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_parallel_matches_sequential() {
    let doc = invoice();
    let parallel = Reconstructor::new().reconstruct(&doc).unwrap();
    let sequential = Reconstructor::with_options(ReconstructOptions::new().sequential())
        .reconstruct(&doc)
        .unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_paginated_files_merge() {
    let merged = load_files([fixture("invoice_part1.json"), fixture("invoice_part2.json")]).unwrap();
    let whole = invoice();

    assert_eq!(merged.page_count(), whole.page_count());
    assert_eq!(merged.fragments.len(), whole.fragments.len());

    let reconstructor = Reconstructor::new();
    assert_eq!(
        reconstructor.reconstruct(&merged).unwrap(),
        reconstructor.reconstruct(&whole).unwrap()
    );
}

#[test]
fn test_paginated_files_from_tempdir() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("1.json");
    let second = dir.path().join("2.json");
    std::fs::write(
        &first,
        r#"{"DocumentMetadata": {"Pages": 2}, "NextToken": "t", "Blocks": [
            {"BlockType": "LINE", "Id": "a", "Page": 1, "Text": "First",
             "Geometry": {"BoundingBox": {"Width": 0.2, "Height": 0.02, "Left": 0.1, "Top": 0.1}}}
        ]}"#,
    )
    .unwrap();
    std::fs::write(
        &second,
        r#"{"Blocks": [
            {"BlockType": "LINE", "Id": "b", "Page": 2, "Text": "Second",
             "Geometry": {"BoundingBox": {"Width": 0.2, "Height": 0.02, "Left": 0.1, "Top": 0.1}}}
        ]}"#,
    )
    .unwrap();

    let doc = load_files([&first, &second]).unwrap();
    let result = unocr::reconstruct(&doc).unwrap();

    assert_eq!(result.pages.len(), 2);
    assert_eq!(result.pages[0].sections[0].line, "First");
    assert_eq!(result.pages[1].sections[0].line, "Second");
}

#[test]
fn test_page_without_lines() {
    let bbox = BoundingBox::new(0.2, 0.1, 0.2, 0.02);
    let doc = Document::from_fragments(vec![
        Fragment::line("l1", 1, bbox, "Only page one"),
        Fragment::word("w1", 2, bbox, "orphan"),
    ]);

    let result = Reconstructor::new().reconstruct(&doc).unwrap();
    assert_eq!(result.pages.len(), 2);
    assert!(result.get_page(2).unwrap().is_empty());
}

#[test]
fn test_line_referencing_cell_is_excluded() {
    let bbox = BoundingBox::new(0.3, 0.1, 0.2, 0.02);
    let doc = Document::from_fragments(vec![
        Fragment::line("l1", 1, BoundingBox::new(0.1, 0.1, 0.2, 0.02), "Header"),
        // Line pointing straight at a cell identifier
        Fragment::line("l2", 1, bbox, "cell text").with_children(["c1"]),
        Fragment::new("t1", 1, BoundingBox::new(0.3, 0.1, 0.5, 0.1), FragmentKind::Table)
            .with_children(["c1"]),
        Fragment::cell("c1", 1, bbox, 1, 1).with_children(["w1"]),
        Fragment::word("w1", 1, bbox, "value"),
    ]);

    let page = Reconstructor::new().reconstruct_page(&doc, 1).unwrap();
    assert_eq!(page.section_count(), 1);
    assert_eq!(page.sections[0].line, "Header");
    assert_eq!(
        page.sections[0].tables,
        Some(vec![Table::from_rows([vec!["value "]])])
    );
}

#[test]
fn test_exclude_table_key_values() {
    let bbox = BoundingBox::new(0.3, 0.1, 0.1, 0.02);
    let fragments = vec![
        Fragment::line("l1", 1, BoundingBox::new(0.1, 0.1, 0.2, 0.02), "Form"),
        Fragment::new("t1", 1, BoundingBox::new(0.25, 0.05, 0.8, 0.2), FragmentKind::Table),
        Fragment::new("k", 1, bbox, FragmentKind::Key)
            .with_relationship(RelationshipKind::Value, ["v"])
            .with_children(["wk"]),
        Fragment::new("v", 1, BoundingBox::new(0.3, 0.4, 0.1, 0.02), FragmentKind::Value)
            .with_children(["wv"]),
        Fragment::word("wk", 1, bbox, "Qty"),
        Fragment::word("wv", 1, bbox, "4"),
    ];
    let doc = Document::from_fragments(fragments);

    let page = Reconstructor::new().reconstruct_page(&doc, 1).unwrap();
    assert_eq!(page.key_value_count(), 1);

    let options = ReconstructOptions::new().with_table_key_values_excluded(true);
    let page = Reconstructor::with_options(options)
        .reconstruct_page(&doc, 1)
        .unwrap();
    assert_eq!(page.key_value_count(), 0);
}

#[test]
fn test_dangling_reference_strict_and_lenient() {
    let bbox = BoundingBox::new(0.1, 0.1, 0.2, 0.02);
    let doc = Document::from_fragments(vec![
        Fragment::line("l1", 1, bbox, "Fine"),
        Fragment::line("l2", 2, bbox, "Broken"),
        Fragment::new("k", 2, BoundingBox::new(0.2, 0.1, 0.1, 0.02), FragmentKind::Key)
            .with_relationship(RelationshipKind::Value, ["missing"]),
    ]);

    let err = Reconstructor::new().reconstruct(&doc).unwrap_err();
    assert!(matches!(err, Error::DanglingReference { page: 2, .. }));

    let result = Reconstructor::with_options(ReconstructOptions::new().lenient())
        .reconstruct(&doc)
        .unwrap();
    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.pages[0].sections[0].line, "Fine");
    assert_eq!(result.failures[0].page, 2);
    assert_eq!(result.stats().failed_page_count, 1);
}

#[test]
fn test_page_selection() {
    let options = ReconstructOptions::new().with_pages(PageSelection::Pages(vec![2]));
    let result = Reconstructor::with_options(options)
        .reconstruct(&invoice())
        .unwrap();

    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.pages[0].page, 2);
}

#[test]
fn test_page_out_of_range() {
    let err = Reconstructor::new()
        .reconstruct_page(&invoice(), 3)
        .unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange(3, 2)));
}
