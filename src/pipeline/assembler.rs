//! Line assembly: raw fragments to logical lines.
//!
//! Fragments are cleaned one by one, then merged into the preceding line
//! when they sit on (nearly) the same row with (nearly) the same font size.
//! This rejoins headings that wrap or were emitted as letter-spaced runs.

use std::collections::HashMap;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::model::{BBox, Fragment, Line, SourceDocument};

use super::options::PipelineOptions;

/// Text normalization applied to every fragment.
pub struct TextCleaner {
    hyphen_regex: Regex,
    whitespace_regex: Regex,
    ligature_map: Vec<(&'static str, &'static str)>,
}

impl TextCleaner {
    /// Create a new cleaner.
    pub fn new() -> Self {
        Self {
            hyphen_regex: Regex::new(r"(\p{L})-\s+(\p{Ll})").expect("static regex"),
            whitespace_regex: Regex::new(r"\s+").expect("static regex"),
            ligature_map: vec![
                ("\u{FB00}", "ff"),
                ("\u{FB01}", "fi"),
                ("\u{FB02}", "fl"),
                ("\u{FB03}", "ffi"),
                ("\u{FB04}", "ffl"),
                ("\u{FB05}", "st"),
                ("\u{FB06}", "st"),
            ],
        }
    }

    /// Normalize one fragment's text.
    ///
    /// NFC, ligatures expanded, `infor- mation` joined, whitespace collapsed,
    /// trimmed, trailing `:` and `.` removed.
    pub fn clean(&self, text: &str) -> String {
        let mut result: String = text.nfc().collect();

        for (ligature, replacement) in &self.ligature_map {
            if result.contains(ligature) {
                result = result.replace(ligature, replacement);
            }
        }

        let result = self.hyphen_regex.replace_all(&result, "$1$2");
        let result = self.whitespace_regex.replace_all(&result, " ");

        result
            .trim()
            .trim_end_matches(|c: char| c == ':' || c == '.' || c.is_whitespace())
            .to_string()
    }
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Merges fragments into lines.
pub struct LineAssembler {
    cleaner: TextCleaner,
    y_tolerance: f32,
    size_tolerance: f32,
    min_chars: usize,
}

impl LineAssembler {
    /// Create an assembler from pipeline options.
    pub fn new(options: &PipelineOptions) -> Self {
        Self {
            cleaner: TextCleaner::new(),
            y_tolerance: options.merge_y_tolerance,
            size_tolerance: options.merge_size_tolerance,
            min_chars: options.min_line_chars,
        }
    }

    /// Assemble the document's fragments into one page-ordered line list.
    pub fn assemble(&self, doc: &SourceDocument) -> Vec<Line> {
        let page_heights: HashMap<u32, f32> =
            doc.pages.iter().map(|p| (p.index, p.height)).collect();

        let mut lines = Vec::new();
        let mut current: Option<PendingLine> = None;

        for fragment in &doc.fragments {
            let text = self.cleaner.clean(&fragment.text);
            if text.chars().count() < self.min_chars {
                continue;
            }

            if let Some(pending) = current.as_mut() {
                if pending.accepts(fragment, self.y_tolerance, self.size_tolerance) {
                    pending.merge(&text, fragment);
                    continue;
                }
            }

            if let Some(pending) = current.take() {
                lines.push(pending.finish());
            }
            let page_height = page_heights.get(&fragment.page).copied().unwrap_or(0.0);
            current = Some(PendingLine::start(text, fragment, page_height));
        }

        if let Some(pending) = current {
            lines.push(pending.finish());
        }

        // Stable: in-page order is the extractor's reading order.
        lines.sort_by_key(|line| line.page);

        log::debug!(
            "LineAssembler: {} fragments -> {} lines",
            doc.fragments.len(),
            lines.len()
        );

        lines
    }
}

/// A line still accepting continuation fragments.
struct PendingLine {
    text: String,
    size_sum: f32,
    fragments: usize,
    bold: bool,
    page: u32,
    block: u32,
    bbox: BBox,
    page_height: f32,
}

impl PendingLine {
    fn start(text: String, fragment: &Fragment, page_height: f32) -> Self {
        Self {
            text,
            size_sum: fragment.size,
            fragments: 1,
            bold: fragment.bold,
            page: fragment.page,
            block: fragment.block,
            bbox: fragment.bbox,
            page_height,
        }
    }

    fn size(&self) -> f32 {
        self.size_sum / self.fragments as f32
    }

    fn accepts(&self, fragment: &Fragment, y_tolerance: f32, size_tolerance: f32) -> bool {
        fragment.page == self.page
            && fragment.block == self.block
            && (fragment.bbox.y0 - self.bbox.y0).abs() <= y_tolerance
            && (fragment.size - self.size()).abs() <= size_tolerance
    }

    fn merge(&mut self, text: &str, fragment: &Fragment) {
        self.text.push(' ');
        self.text.push_str(text);
        self.size_sum += fragment.size;
        self.fragments += 1;
        self.bold |= fragment.bold;
        self.bbox = self.bbox.union(&fragment.bbox);
    }

    fn finish(self) -> Line {
        Line {
            size: self.size(),
            text: self.text,
            bold: self.bold,
            page: self.page,
            bbox: self.bbox,
            page_height: self.page_height,
        }
    }
}
