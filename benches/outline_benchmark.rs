//! Benchmarks for pdfoutline inference performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the pipeline over synthetic layout documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pdfoutline::pipeline::{normalize_hierarchy, TextCleaner};
use pdfoutline::{
    BBox, Fragment, HeadingLevel, OutlineEntry, Outliner, PageInfo, PipelineOptions,
    SourceDocument, TocEntry,
};

const BODY: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod \
    tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud \
    exercitation ullamco laboris.";

/// Creates a synthetic document with a section heading, a subsection heading
/// and body paragraphs on every page.
fn create_test_document(page_count: u32) -> SourceDocument {
    let mut doc = SourceDocument::new();

    for page in 1..=page_count {
        doc.add_page(PageInfo::letter(page));

        doc.add_fragment(Fragment::new(
            format!("Chapter {} Overview Of Results", page),
            20.0,
            true,
            page,
            BBox::new(72.0, 72.0, 400.0, 92.0),
        ));
        doc.add_fragment(Fragment::new(
            format!("Section {} Detailed Findings", page),
            14.0,
            true,
            page,
            BBox::new(72.0, 120.0, 360.0, 134.0),
        ));

        for line in 0..20 {
            let y = 160.0 + line as f32 * 14.0;
            doc.add_fragment(Fragment::new(
                BODY,
                11.0,
                false,
                page,
                BBox::new(72.0, y, 540.0, y + 11.0),
            ));
        }

        doc.add_fragment(Fragment::new(
            format!("Page {}", page),
            9.0,
            false,
            page,
            BBox::new(290.0, 760.0, 320.0, 769.0),
        ));
    }

    doc
}

/// Benchmark text cleaning.
fn bench_text_cleaning(c: &mut Criterion) {
    let cleaner = TextCleaner::new();
    let text = "  The ﬁnal infor- mation   about the   project:  ";

    c.bench_function("clean_text", |b| {
        b.iter(|| cleaner.clean(black_box(text)));
    });
}

/// Benchmark the heuristic pipeline at various sizes.
fn bench_heuristic_outline(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristic_outline");
    let outliner = Outliner::with_options(PipelineOptions::new().without_toc());

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| outliner.extract(black_box(&doc)));
        });
    }

    group.finish();
}

/// Benchmark the TOC path.
fn bench_toc_outline(c: &mut Criterion) {
    let toc: Vec<TocEntry> = (1..=50)
        .map(|page| TocEntry::new(1 + page % 3, format!("Entry number {}", page), page))
        .collect();
    let doc = create_test_document(50).with_toc(toc);
    let outliner = Outliner::new();

    c.bench_function("toc_outline_50_pages", |b| {
        b.iter(|| outliner.extract(black_box(&doc)));
    });
}

/// Benchmark hierarchy normalization.
fn bench_normalization(c: &mut Criterion) {
    let entries: Vec<OutlineEntry> = (0..500)
        .map(|i| {
            let level =
                HeadingLevel::from_depth(1 + (i * 7 % 4) as u32).unwrap_or(HeadingLevel::H1);
            OutlineEntry::new(level, format!("Heading {}", i), i as u32 / 10)
        })
        .collect();

    c.bench_function("normalize_500_entries", |b| {
        b.iter(|| normalize_hierarchy(black_box(entries.clone())));
    });
}

criterion_group!(
    benches,
    bench_text_cleaning,
    bench_heuristic_outline,
    bench_toc_outline,
    bench_normalization,
);
criterion_main!(benches);
