//! Integration tests for outline rendering.

use pdfoutline::render::{to_json, to_markdown, to_text};
use pdfoutline::{
    BBox, Fragment, HeadingLevel, JsonFormat, OutlineEntry, OutlineResult, PageInfo, PdfOutline,
    RenderOptions, SourceDocument, TocEntry,
};

fn toc_document() -> SourceDocument {
    let mut doc = SourceDocument::new();
    for page in 1..=6 {
        doc.add_page(PageInfo::letter(page));
    }
    doc.add_fragment(Fragment::new(
        "Field Guide",
        28.0,
        true,
        1,
        BBox::new(200.0, 50.0, 400.0, 78.0),
    ));
    doc.with_toc(vec![
        TocEntry::new(1, "Getting Started", 1),
        TocEntry::new(2, "Installing *tools*", 2),
        TocEntry::new(3, "Linux_and_macOS", 2),
        TocEntry::new(2, "First Run", 3),
        TocEntry::new(1, "Reference", 6),
    ])
}

#[test]
fn test_builder_renders_all_formats() {
    let output = PdfOutline::new().extract(&toc_document());

    assert_eq!(output.result().title, "Field Guide");
    assert_eq!(output.result().heading_count(), 5);

    let markdown = output.to_markdown().unwrap();
    assert_eq!(
        markdown,
        "# Field Guide\n\n\
         - Getting Started (p. 1)\n\
         \x20 - Installing \\*tools\\* (p. 2)\n\
         \x20   - Linux\\_and\\_macOS (p. 2)\n\
         \x20 - First Run (p. 3)\n\
         - Reference (p. 6)"
    );

    let text = output.to_text().unwrap();
    assert!(text.starts_with("Field Guide\n\nGetting Started .... 1\n"));
    assert!(text.contains("\n    Linux_and_macOS .... 2\n"));

    let json = output.to_json(JsonFormat::Compact).unwrap();
    assert!(json.starts_with(
        r#"{"title":"Field Guide","outline":[{"level":"H1","text":"Getting Started","page":1}"#
    ));
}

#[test]
fn test_builder_without_pages() {
    let markdown = PdfOutline::new()
        .without_pages()
        .extract(&toc_document())
        .to_markdown()
        .unwrap();
    assert!(markdown.contains("- Reference\n") || markdown.ends_with("- Reference"));
    assert!(!markdown.contains("(p."));
}

#[test]
fn test_outline_not_starting_at_h1_renders_flat_roots() {
    let result = OutlineResult::new(
        "",
        vec![
            OutlineEntry::new(HeadingLevel::H2, "Section A", 1),
            OutlineEntry::new(HeadingLevel::H3, "Detail A.1", 1),
            OutlineEntry::new(HeadingLevel::H2, "Section B", 2),
        ],
    );

    let options = RenderOptions::new().with_pages(false);
    let markdown = to_markdown(&result, &options).unwrap();
    assert_eq!(markdown, "- Section A\n  - Detail A.1\n- Section B");

    let text = to_text(&result, &options).unwrap();
    assert_eq!(text, "Section A\n  Detail A.1\nSection B");
}

#[test]
fn test_json_round_trip() {
    let output = PdfOutline::new().extract(&toc_document());
    let json = to_json(output.result(), JsonFormat::Pretty).unwrap();
    let back: OutlineResult = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, output.result());
}
