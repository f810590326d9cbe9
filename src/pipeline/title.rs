//! Title resolution.

use std::cmp::Ordering;

use regex::Regex;

use crate::model::{Line, SourceDocument};

use super::assembler::TextCleaner;
use super::options::PipelineOptions;

/// Picks the document title from first-page layout or metadata.
pub struct TitleResolver<'a> {
    options: &'a PipelineOptions,
    cleaner: TextCleaner,
    filename_regex: Regex,
}

impl<'a> TitleResolver<'a> {
    /// Create a resolver.
    pub fn new(options: &'a PipelineOptions) -> Self {
        Self {
            options,
            cleaner: TextCleaner::new(),
            filename_regex: Regex::new(r"(?i)[/\\_]|\.(pdf|docx?|pptx?|xlsx?|txt|rtf|odt)$")
                .expect("static regex"),
        }
    }

    /// Metadata title, unless it is missing or looks like a file name.
    pub fn from_metadata(&self, metadata_title: Option<&str>) -> Option<String> {
        let title = self.cleaner.clean(metadata_title?);
        if title.is_empty() || self.filename_regex.is_match(&title) {
            return None;
        }
        Some(title)
    }

    /// Title from the top of the first page.
    ///
    /// The first page is the lowest page index in the page geometry, or the
    /// lowest page with text when no geometry was supplied. A first page
    /// without text yields no title. Among the largest lines of the top
    /// region, bold lines win, then the line whose center is closest to the
    /// page center.
    pub fn from_layout(&self, lines: &[Line], doc: &SourceDocument) -> String {
        let first_page = match doc.pages.iter().map(|p| p.index).min() {
            Some(index) => index,
            None => match lines.iter().map(|l| l.page).min() {
                Some(page) => page,
                None => return String::new(),
            },
        };

        let mut page_lines: Vec<&Line> = lines.iter().filter(|l| l.page == first_page).collect();
        page_lines.sort_by(|a, b| a.y0().partial_cmp(&b.y0()).unwrap_or(Ordering::Equal));

        let page = doc.page(first_page);
        let page_height = page
            .map(|p| p.height)
            .filter(|h| *h > 0.0)
            .or_else(|| page_lines.first().map(|l| l.page_height).filter(|h| *h > 0.0))
            .unwrap_or_else(|| page_lines.iter().map(|l| l.bbox.y1).fold(0.0, f32::max));
        let page_width = page
            .map(|p| p.width)
            .filter(|w| *w > 0.0)
            .unwrap_or(self.options.default_page_width);

        let region_bottom = page_height * self.options.title_region_ratio;
        let mut top_section: Vec<&Line> = page_lines
            .iter()
            .copied()
            .filter(|l| l.y0() < region_bottom)
            .collect();
        if top_section.is_empty() {
            top_section = page_lines
                .iter()
                .copied()
                .take(self.options.title_fallback_lines)
                .collect();
        }

        let max_size = top_section.iter().map(|l| l.size).fold(0.0, f32::max);
        let threshold = max_size * self.options.title_size_ratio;
        let center = page_width / 2.0;

        let mut candidates: Vec<&Line> = top_section
            .into_iter()
            .filter(|l| l.size >= threshold)
            .collect();
        candidates.sort_by(|a, b| {
            b.bold.cmp(&a.bold).then_with(|| {
                let da = (a.bbox.center_x() - center).abs();
                let db = (b.bbox.center_x() - center).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
        });

        candidates
            .first()
            .map(|l| l.text.clone())
            .unwrap_or_default()
    }

    /// Metadata title when plausible, layout title otherwise.
    pub fn resolve(&self, lines: &[Line], doc: &SourceDocument) -> String {
        if self.options.use_metadata_title {
            if let Some(title) = self.from_metadata(doc.metadata_title.as_deref()) {
                log::debug!("TitleResolver: using metadata title {:?}", title);
                return title;
            }
        }
        self.from_layout(lines, doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BBox, PageInfo};

    fn line(text: &str, size: f32, bold: bool, page: u32, x0: f32, y0: f32) -> Line {
        Line {
            text: text.to_string(),
            size,
            bold,
            page,
            bbox: BBox::new(x0, y0, x0 + 200.0, y0 + size),
            page_height: 842.0,
        }
    }

    fn a4_doc() -> SourceDocument {
        let mut doc = SourceDocument::new();
        doc.add_page(PageInfo::a4(0));
        doc.add_page(PageInfo::a4(1));
        doc
    }

    #[test]
    fn test_largest_top_line_wins() {
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        let lines = vec![
            line("Company Letterhead", 10.0, false, 0, 50.0, 30.0),
            line("Quarterly Business Review", 24.0, false, 0, 50.0, 80.0),
            line("Body paragraph text", 11.0, false, 0, 50.0, 400.0),
            line("Bigger Later Page", 40.0, true, 1, 50.0, 80.0),
        ];
        assert_eq!(resolver.from_layout(&lines, &a4_doc()), "Quarterly Business Review");
    }

    #[test]
    fn test_bold_then_centered() {
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        let lines = vec![
            line("Left Aligned Plain", 20.0, false, 0, 50.0, 60.0),
            line("Left Aligned Bold", 19.0, true, 0, 20.0, 90.0),
            line("Centered Bold", 19.5, true, 0, 197.5, 120.0),
        ];
        assert_eq!(resolver.from_layout(&lines, &a4_doc()), "Centered Bold");
    }

    #[test]
    fn test_falls_back_to_first_lines() {
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        let lines = vec![
            line("Lower Heading", 18.0, false, 0, 50.0, 500.0),
            line("Lower body", 11.0, false, 0, 50.0, 520.0),
        ];
        assert_eq!(resolver.from_layout(&lines, &a4_doc()), "Lower Heading");
        assert_eq!(resolver.from_layout(&[], &a4_doc()), "");
    }

    #[test]
    fn test_first_page_is_lowest_index() {
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        let lines = vec![
            line("Cover Title", 22.0, true, 1, 50.0, 50.0),
            line("Page two heading", 30.0, true, 2, 50.0, 50.0),
        ];
        assert_eq!(resolver.from_layout(&lines, &SourceDocument::new()), "Cover Title");
    }

    #[test]
    fn test_blank_first_page_has_no_title() {
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        let lines = vec![line("Second Page Heading", 24.0, true, 1, 50.0, 60.0)];
        assert_eq!(resolver.from_layout(&lines, &a4_doc()), "");
    }

    #[test]
    fn test_metadata_title() {
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        assert_eq!(
            resolver.from_metadata(Some("  Digital Library Plan ")),
            Some("Digital Library Plan".to_string())
        );
        assert_eq!(resolver.from_metadata(Some("Microsoft Word - plan.docx")), None);
        assert_eq!(resolver.from_metadata(Some("final_draft_v2")), None);
        assert_eq!(resolver.from_metadata(Some("C:/docs/report")), None);
        assert_eq!(resolver.from_metadata(Some("Annual Report.PDF")), None);
        assert_eq!(
            resolver.from_metadata(Some("Getting Started with Node.js")),
            Some("Getting Started with Node.js".to_string())
        );
        assert_eq!(
            resolver.from_metadata(Some("Release Notes v2.1")),
            Some("Release Notes v2.1".to_string())
        );
        assert_eq!(resolver.from_metadata(Some("   ")), None);
        assert_eq!(resolver.from_metadata(None), None);
    }

    #[test]
    fn test_resolve_prefers_metadata() {
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        let lines = vec![line("Layout Title", 24.0, true, 0, 50.0, 50.0)];
        let doc = a4_doc().with_metadata_title("Metadata Title");
        assert_eq!(resolver.resolve(&lines, &doc), "Metadata Title");

        let options = PipelineOptions::default().without_metadata_title();
        let resolver = TitleResolver::new(&options);
        assert_eq!(resolver.resolve(&lines, &doc), "Layout Title");

        let doc = a4_doc().with_metadata_title("scan_0001.pdf");
        let options = PipelineOptions::default();
        let resolver = TitleResolver::new(&options);
        assert_eq!(resolver.resolve(&lines, &doc), "Layout Title");
    }
}
