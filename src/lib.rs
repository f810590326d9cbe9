//! # pdfoutline
//!
//! Title and heading-outline inference for PDF documents.
//!
//! The library consumes the layout an upstream PDF text extractor produces
//! (text fragments with font size, boldness, page and bounding box, plus an
//! optional embedded table of contents) and infers a document title and a
//! hierarchical H1-H3 outline from typographic and positional cues.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{load_source_file, render, extract_outline};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     // Load a layout dump
//!     let doc = load_source_file("report.json")?;
//!
//!     // Infer title and outline
//!     let result = extract_outline(&doc);
//!
//!     // Render as JSON
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **TOC first**: a usable embedded table of contents is emitted verbatim
//! - **Layout heuristics**: body-size estimation, noise filtering, style
//!   clustering and hierarchy repair when no TOC is usable
//! - **Never fails on content**: unreadable input yields an empty result
//! - **Multiple output formats**: JSON, Markdown, plain text
//! - **Batch processing**: directories of documents, in parallel with Rayon

pub mod batch;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use batch::{
    run_batch, run_batch_with_progress, BatchOptions, BatchReport, DocumentReport, DocumentStatus,
};
pub use error::{Error, Result};
pub use model::{
    BBox, Fragment, HeadingLevel, OutlineEntry, OutlineNode, OutlineResult, PageInfo,
    SourceDocument, Span, TocEntry,
};
pub use pipeline::{DocumentAnalysis, NoiseConfig, OutlineOrder, Outliner, PipelineOptions};
pub use render::{JsonFormat, RenderOptions};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Infer the title and outline of a document with default options.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, SourceDocument};
///
/// let result = extract_outline(&SourceDocument::new());
/// assert!(result.is_empty());
/// ```
pub fn extract_outline(doc: &SourceDocument) -> OutlineResult {
    Outliner::new().extract(doc)
}

/// Infer the title and outline of a document with custom options.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline_with_options, HeadingLevel, PipelineOptions, SourceDocument};
///
/// let options = PipelineOptions::new()
///     .without_toc()
///     .with_max_level(HeadingLevel::H4);
/// let result = extract_outline_with_options(&SourceDocument::new(), &options);
/// assert!(result.outline.is_empty());
/// ```
pub fn extract_outline_with_options(
    doc: &SourceDocument,
    options: &PipelineOptions,
) -> OutlineResult {
    Outliner::with_options(options.clone()).extract(doc)
}

/// Load a layout dump (JSON-serialized [`SourceDocument`]) from a file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::load_source_file;
///
/// let doc = load_source_file("report.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_source_file<P: AsRef<Path>>(path: P) -> Result<SourceDocument> {
    let file = File::open(path)?;
    load_source_reader(BufReader::new(file))
}

/// Load a layout dump from bytes.
pub fn load_source_bytes(data: &[u8]) -> Result<SourceDocument> {
    Ok(serde_json::from_slice(data)?)
}

/// Load a layout dump from a reader.
pub fn load_source_reader<R: Read>(reader: R) -> Result<SourceDocument> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a layout dump and infer its outline.
///
/// Only I/O and decoding errors are returned; the inference itself never
/// fails.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::outline_file;
///
/// let result = outline_file("report.json").unwrap();
/// println!("{}: {} headings", result.title, result.heading_count());
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    let doc = load_source_file(path)?;
    Ok(extract_outline(&doc))
}

/// Builder for extracting and rendering outlines.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::PdfOutline;
///
/// let markdown = PdfOutline::new()
///     .without_toc()
///     .without_pages()
///     .parse_file("report.json")?
///     .to_markdown()?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub struct PdfOutline {
    pipeline_options: PipelineOptions,
    render_options: RenderOptions,
}

impl PdfOutline {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pipeline_options: PipelineOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Ignore the embedded table of contents.
    pub fn without_toc(mut self) -> Self {
        self.pipeline_options = self.pipeline_options.without_toc();
        self
    }

    /// Ignore the metadata title.
    pub fn without_metadata_title(mut self) -> Self {
        self.pipeline_options = self.pipeline_options.without_metadata_title();
        self
    }

    /// Set the deepest heuristic heading level.
    pub fn with_max_level(mut self, level: HeadingLevel) -> Self {
        self.pipeline_options = self.pipeline_options.with_max_level(level);
        self
    }

    /// Replace the pipeline options.
    pub fn with_pipeline_options(mut self, options: PipelineOptions) -> Self {
        self.pipeline_options = options;
        self
    }

    /// Replace the render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Omit page references from rendered output.
    pub fn without_pages(mut self) -> Self {
        self.render_options = self.render_options.with_pages(false);
        self
    }

    /// Infer the outline of an in-memory document.
    pub fn extract(self, doc: &SourceDocument) -> OutlineOutput {
        let result = Outliner::with_options(self.pipeline_options).extract(doc);
        OutlineOutput {
            result,
            render_options: self.render_options,
        }
    }

    /// Load a layout dump and infer its outline.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<OutlineOutput> {
        let doc = load_source_file(path)?;
        Ok(self.extract(&doc))
    }

    /// Load a layout dump from bytes and infer its outline.
    pub fn parse_bytes(self, data: &[u8]) -> Result<OutlineOutput> {
        let doc = load_source_bytes(data)?;
        Ok(self.extract(&doc))
    }
}

impl Default for PdfOutline {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of outline extraction.
pub struct OutlineOutput {
    /// The inferred title and outline
    pub result: OutlineResult,
    /// Render options to use
    render_options: RenderOptions,
}

impl OutlineOutput {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.result, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.result, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.result, format)
    }

    /// Get the result.
    pub fn result(&self) -> &OutlineResult {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let builder = PdfOutline::new()
            .without_toc()
            .without_metadata_title()
            .with_max_level(HeadingLevel::H4)
            .without_pages();

        assert!(!builder.pipeline_options.use_toc);
        assert!(!builder.pipeline_options.use_metadata_title);
        assert_eq!(builder.pipeline_options.max_level, HeadingLevel::H4);
        assert!(!builder.render_options.include_pages);
    }

    #[test]
    fn test_builder_default() {
        let builder = PdfOutline::default();
        assert!(builder.pipeline_options.use_toc);
        assert!(builder.render_options.include_title);
    }

    // ==================== Loading Tests ====================

    #[test]
    fn test_load_source_bytes_empty_object() {
        let doc = load_source_bytes(b"{}").unwrap();
        assert!(doc.is_empty());
        assert!(doc.toc.is_none());
    }

    #[test]
    fn test_load_source_bytes_invalid() {
        let result = load_source_bytes(b"not json");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_load_source_reader() {
        let json = r#"{
            "metadata_title": "Plan",
            "pages": [{"index": 1, "width": 595.0, "height": 842.0}],
            "fragments": [
                {"text": "Overall Plan", "size": 20.0, "bold": true, "page": 1,
                 "bbox": [72.0, 60.0, 300.0, 80.0]}
            ]
        }"#;
        let doc = load_source_reader(json.as_bytes()).unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.fragments[0].block, 0);
        assert_eq!(doc.metadata_title.as_deref(), Some("Plan"));
    }

    #[test]
    fn test_load_source_with_span_lines() {
        let json = r#"{
            "pages": [{"index": 0, "width": 595.0, "height": 842.0}],
            "fragments": [
                {"spans": [{"text": "Project ", "size": 20.0, "font": "Arial-BoldMT"},
                           {"text": "Charter", "size": 20.0, "font": "ArialMT"}],
                 "page": 0, "bbox": [72.0, 60.0, 300.0, 80.0]}
            ]
        }"#;
        let doc = load_source_bytes(json.as_bytes()).unwrap();
        assert_eq!(doc.fragments[0].text, "Project Charter");
        assert!(doc.fragments[0].bold);
        assert_eq!(extract_outline(&doc).title, "Project Charter");
    }

    #[test]
    fn test_load_source_file_missing() {
        let result = load_source_file("/nonexistent/layout.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    // ==================== Output Tests ====================

    #[test]
    fn test_builder_parse_bytes() {
        let output = PdfOutline::new()
            .parse_bytes(br#"{"fragments": []}"#)
            .unwrap();
        assert_eq!(output.result(), &OutlineResult::empty());
        assert_eq!(output.to_json(JsonFormat::Compact).unwrap(), r#"{"title":"","outline":[]}"#);
        assert!(output.to_markdown().unwrap().is_empty());
        assert!(output.to_text().unwrap().is_empty());
    }

    #[test]
    fn test_builder_parse_invalid_bytes() {
        let result = PdfOutline::new().parse_bytes(b"not json");
        assert!(result.is_err());
    }
}
