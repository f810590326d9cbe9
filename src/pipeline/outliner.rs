//! Outline orchestration.
//!
//! ```text
//! AwaitToc ──(≥ min usable TOC entries)──> UseToc ──┐
//!     └──────────(otherwise)──────────> RunHeuristic ┴──> Done
//! ```
//!
//! `Done` always carries a well-formed outline; nothing in here fails.

use std::collections::HashSet;

use crate::model::{HeadingLevel, Line, OutlineEntry, OutlineResult, SourceDocument, TocEntry};

use super::assembler::{LineAssembler, TextCleaner};
use super::body_style::IndentStats;
use super::candidates::CandidateSelector;
use super::clustering::{StyleCluster, StyleClusterer};
use super::context::DocumentContext;
use super::hierarchy::normalize_hierarchy;
use super::options::{OutlineOrder, PipelineOptions};
use super::title::TitleResolver;

/// Orchestrator states.
#[derive(Debug)]
enum OutlineState {
    AwaitToc,
    UseToc(Vec<OutlineEntry>),
    RunHeuristic,
    Done(Vec<OutlineEntry>),
}

impl OutlineState {
    fn name(&self) -> &'static str {
        match self {
            Self::AwaitToc => "AwaitToc",
            Self::UseToc(_) => "UseToc",
            Self::RunHeuristic => "RunHeuristic",
            Self::Done(_) => "Done",
        }
    }
}

/// Intermediate statistics of one document, for diagnostics.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    /// Number of fragments supplied
    pub fragment_count: usize,
    /// Number of assembled lines
    pub line_count: usize,
    /// Baseline body font size
    pub body_size: f32,
    /// Body indentation statistics
    pub indent: IndentStats,
    /// Number of heading candidates
    pub candidate_count: usize,
    /// Ranked style clusters
    pub clusters: Vec<StyleCluster>,
    /// Number of supplied TOC entries
    pub toc_entries: usize,
    /// Number of TOC entries that survive filtering
    pub usable_toc_entries: usize,
    /// Whether the TOC replaces the heuristic outline
    pub uses_toc: bool,
    /// Resolved title
    pub title: String,
}

/// Infers the title and outline of a document.
#[derive(Debug, Clone, Default)]
pub struct Outliner {
    options: PipelineOptions,
}

impl Outliner {
    /// Create an outliner with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an outliner with custom options.
    pub fn with_options(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run the full pipeline. Never fails: unreadable input yields an
    /// empty result.
    pub fn extract(&self, doc: &SourceDocument) -> OutlineResult {
        if doc.is_empty() {
            log::debug!("Outliner: no fragments, emitting empty result");
            return OutlineResult::empty();
        }

        let lines = LineAssembler::new(&self.options).assemble(doc);
        let title = TitleResolver::new(&self.options).resolve(&lines, doc);

        let mut state = OutlineState::AwaitToc;
        let outline = loop {
            let next = match state {
                OutlineState::AwaitToc => match self.usable_toc(doc) {
                    Some(entries) => OutlineState::UseToc(entries),
                    None => OutlineState::RunHeuristic,
                },
                OutlineState::UseToc(entries) => OutlineState::Done(entries),
                OutlineState::RunHeuristic => OutlineState::Done(self.heuristic_outline(&lines)),
                OutlineState::Done(outline) => break outline,
            };
            log::debug!("Outliner: -> {}", next.name());
            state = next;
        };

        OutlineResult::new(title, outline)
    }

    /// Clean and filter an embedded TOC.
    ///
    /// Keeps entries with a level in `1..=max_toc_level`, enough words, a
    /// bounded length and a known page; drops duplicates. Order and levels
    /// are kept as supplied.
    pub fn filter_toc(&self, toc: &[TocEntry], doc: &SourceDocument) -> Vec<OutlineEntry> {
        let cleaner = TextCleaner::new();
        let mut seen = HashSet::new();

        toc.iter()
            .filter_map(|item| {
                if item.level == 0 || item.level > self.options.max_toc_level {
                    return None;
                }
                let level = HeadingLevel::from_depth(item.level)?;
                let text = cleaner.clean(&item.text);
                if text.is_empty()
                    || text.split_whitespace().count() < self.options.toc_min_words
                    || text.chars().count() >= self.options.max_toc_chars
                    || !doc.has_page(item.page)
                {
                    return None;
                }
                let entry = OutlineEntry::new(level, text, item.page);
                seen.insert(entry.key()).then_some(entry)
            })
            .collect()
    }

    /// The filtered TOC, when it is trustworthy enough to replace the
    /// heuristic outline.
    fn usable_toc(&self, doc: &SourceDocument) -> Option<Vec<OutlineEntry>> {
        if !self.options.use_toc {
            return None;
        }
        let toc = doc.toc.as_ref()?;
        if toc.len() < self.options.min_toc_entries {
            return None;
        }

        let entries = self.filter_toc(toc, doc);
        log::debug!(
            "Outliner: {} of {} TOC entries usable",
            entries.len(),
            toc.len()
        );
        (entries.len() >= self.options.min_toc_entries).then_some(entries)
    }

    /// Heuristic outline over assembled lines: candidates, clustering,
    /// ordering and normalization.
    pub fn heuristic_outline(&self, lines: &[Line]) -> Vec<OutlineEntry> {
        if lines.is_empty() {
            return Vec::new();
        }

        let context = DocumentContext::from_lines(lines, &self.options);
        let candidates = CandidateSelector::new(&self.options).select(lines, &context);
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut entries = StyleClusterer::new(&self.options).assign(&candidates);
        match self.options.outline_order {
            OutlineOrder::PageThenLevel => entries.sort_by_key(|e| (e.page, e.level)),
            OutlineOrder::Reading => entries.sort_by_key(|e| e.page),
        }

        normalize_hierarchy(entries)
    }

    /// Run the stages up to clustering and report their statistics.
    pub fn analyze(&self, doc: &SourceDocument) -> DocumentAnalysis {
        let lines = LineAssembler::new(&self.options).assemble(doc);
        let context = DocumentContext::from_lines(&lines, &self.options);
        let candidates = CandidateSelector::new(&self.options).select(&lines, &context);
        let clusters = StyleClusterer::new(&self.options).clusters(&candidates);
        let toc_entries = doc.toc.as_ref().map_or(0, |toc| toc.len());
        let usable_toc_entries = doc
            .toc
            .as_ref()
            .map_or(0, |toc| self.filter_toc(toc, doc).len());

        DocumentAnalysis {
            fragment_count: doc.fragments.len(),
            line_count: lines.len(),
            body_size: context.body_size,
            indent: context.indent,
            candidate_count: candidates.len(),
            clusters,
            toc_entries,
            usable_toc_entries,
            uses_toc: !doc.is_empty() && self.usable_toc(doc).is_some(),
            title: TitleResolver::new(&self.options).resolve(&lines, doc),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, Fragment, PageInfo};
    use HeadingLevel::*;

    fn body_text() -> String {
        "The committee reviewed the proposal in detail and agreed that the \
         implementation plan should proceed in three phases over the coming year, \
         subject to funding."
            .to_string()
    }

    fn doc_with_headings() -> SourceDocument {
        let mut doc = SourceDocument::new();
        for page in 1..=3 {
            doc.add_page(PageInfo::a4(page));
        }
        let mut y = 60.0;
        let mut push = |doc: &mut SourceDocument, text: &str, size: f32, bold: bool, page: u32| {
            doc.add_fragment(Fragment::new(
                text,
                size,
                bold,
                page,
                BBox::new(72.0, y, 520.0, y + size),
            ));
            y = if y > 700.0 { 60.0 } else { y + 40.0 };
        };

        push(&mut doc, "Strategic Plan", 26.0, true, 1);
        push(&mut doc, &body_text(), 11.0, false, 1);
        push(&mut doc, "Funding Sources", 16.0, true, 1);
        push(&mut doc, &body_text(), 11.0, false, 1);
        push(&mut doc, "Grant Programs", 13.0, true, 2);
        push(&mut doc, &body_text(), 11.0, false, 2);
        push(&mut doc, "Implementation Phases", 16.0, true, 3);
        push(&mut doc, &body_text(), 11.0, false, 3);
        doc
    }

    #[test]
    fn test_heuristic_outline() {
        let result = Outliner::new().extract(&doc_with_headings());

        assert_eq!(result.title, "Strategic Plan");
        assert_eq!(
            result.outline,
            vec![
                OutlineEntry::new(H1, "Strategic Plan", 1),
                OutlineEntry::new(H2, "Funding Sources", 1),
                OutlineEntry::new(H3, "Grant Programs", 2),
                OutlineEntry::new(H2, "Implementation Phases", 3),
            ]
        );
    }

    #[test]
    fn test_toc_preferred() {
        let doc = doc_with_headings().with_toc(vec![
            TocEntry::new(1, "Strategic Plan", 1),
            TocEntry::new(2, "Funding  Sources:", 1),
            TocEntry::new(1, "Implementation Phases", 3),
        ]);
        let result = Outliner::new().extract(&doc);

        assert_eq!(
            result.outline,
            vec![
                OutlineEntry::new(H1, "Strategic Plan", 1),
                OutlineEntry::new(H2, "Funding Sources", 1),
                OutlineEntry::new(H1, "Implementation Phases", 3),
            ]
        );
    }

    #[test]
    fn test_toc_filtering() {
        let outliner = Outliner::with_options(PipelineOptions::default().with_toc_min_words(2));
        let doc = doc_with_headings();
        let toc = vec![
            TocEntry::new(1, "Strategic Plan", 1),
            TocEntry::new(4, "Too Deep Entry", 1),
            TocEntry::new(0, "Level Zero Entry", 1),
            TocEntry::new(1, "Single", 1),
            TocEntry::new(1, "Unknown Page Entry", 9),
            TocEntry::new(1, "x ".repeat(80), 2),
            TocEntry::new(1, "STRATEGIC PLAN", 1),
        ];
        let entries = outliner.filter_toc(&toc, &doc);
        assert_eq!(entries, vec![OutlineEntry::new(H1, "Strategic Plan", 1)]);
    }

    #[test]
    fn test_small_toc_falls_back_to_heuristic() {
        let doc = doc_with_headings().with_toc(vec![
            TocEntry::new(1, "Strategic Plan", 1),
            TocEntry::new(1, "Appendix Tables", 3),
        ]);
        let result = Outliner::new().extract(&doc);
        assert_eq!(result.outline.len(), 4);
    }

    #[test]
    fn test_toc_disabled() {
        let doc = doc_with_headings().with_toc(vec![
            TocEntry::new(1, "One Entry", 1),
            TocEntry::new(1, "Two Entry", 2),
            TocEntry::new(1, "Three Entry", 3),
        ]);
        let result = Outliner::with_options(PipelineOptions::new().without_toc()).extract(&doc);
        assert_eq!(result.outline[0].text, "Strategic Plan");
    }

    #[test]
    fn test_empty_document() {
        let doc = SourceDocument::new()
            .with_metadata_title("Some Title")
            .with_toc(vec![
                TocEntry::new(1, "One Entry", 1),
                TocEntry::new(1, "Two Entry", 2),
                TocEntry::new(1, "Three Entry", 3),
            ]);
        assert_eq!(Outliner::new().extract(&doc), OutlineResult::empty());
    }

    #[test]
    fn test_reading_order_option() {
        let mut doc = SourceDocument::new();
        doc.add_page(PageInfo::a4(0));
        doc.add_fragment(Fragment::new(
            "Minor Topic First",
            12.0,
            true,
            0,
            BBox::new(72.0, 100.0, 300.0, 112.0),
        ));
        doc.add_fragment(Fragment::new(
            "Major Topic Later",
            20.0,
            true,
            0,
            BBox::new(72.0, 300.0, 300.0, 320.0),
        ));

        let default = Outliner::new().extract(&doc);
        assert_eq!(default.outline[0].text, "Major Topic Later");
        assert_eq!(default.outline[1].level, H2);

        let options = PipelineOptions::new().with_outline_order(OutlineOrder::Reading);
        let reading = Outliner::with_options(options).extract(&doc);
        assert_eq!(reading.outline[0].text, "Minor Topic First");
        assert_eq!(reading.outline[0].level, H1);
        assert_eq!(reading.outline[1].level, H1);
    }

    #[test]
    fn test_analyze() {
        let analysis = Outliner::new().analyze(&doc_with_headings());
        assert_eq!(analysis.fragment_count, 8);
        assert_eq!(analysis.line_count, 8);
        assert_eq!(analysis.body_size, 11.0);
        assert_eq!(analysis.candidate_count, 4);
        assert_eq!(analysis.clusters.len(), 3);
        assert!(!analysis.uses_toc);
        assert_eq!(analysis.title, "Strategic Plan");
    }
}
