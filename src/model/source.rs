//! Layout primitives supplied by the upstream text extractor.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in layout units (`x0, y0, x1, y1`).
///
/// `y` grows downwards: `y0` is the top edge of the text.
/// Serialized as a four-element array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }
}

impl From<[f32; 4]> for BBox {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BBox> for [f32; 4] {
    fn from(b: BBox) -> Self {
        [b.x0, b.y0, b.x1, b.y1]
    }
}

/// A run of text in a single font, as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub font: String,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32, font: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size,
            font: font.into(),
        }
    }

    /// Whether the font name indicates a bold face.
    pub fn is_bold(&self) -> bool {
        let font = self.font.to_lowercase();
        font.contains("bold") || font.contains("black") || font.contains("heavy")
    }

    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Smallest text unit with position and font metadata.
///
/// In a layout dump a fragment carries either `text` and `size` (with an
/// optional `bold`), or the `spans` of one extractor line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FragmentRecord")]
pub struct Fragment {
    /// Raw text (cleaned by the line assembler)
    pub text: String,
    /// Font size in points
    pub size: f32,
    /// Whether the text is set in a bold face
    #[serde(default)]
    pub bold: bool,
    /// Page index (source-indexed)
    pub page: u32,
    /// Bounding box
    pub bbox: BBox,
    /// Extractor block index; fragments are only merged inside one block
    #[serde(default)]
    pub block: u32,
}

impl Fragment {
    /// Create a new fragment in block 0.
    pub fn new(text: impl Into<String>, size: f32, bold: bool, page: u32, bbox: BBox) -> Self {
        Self {
            text: text.into(),
            size,
            bold,
            page,
            bbox,
            block: 0,
        }
    }

    /// Set the block index.
    pub fn in_block(mut self, block: u32) -> Self {
        self.block = block;
        self
    }

    /// Build a fragment from the spans of one extractor line.
    ///
    /// Size is the mean over non-blank spans; the fragment is bold if any
    /// non-blank span is. Returns `None` when every span is blank.
    pub fn from_spans(spans: &[Span], page: u32, bbox: BBox) -> Option<Self> {
        let visible: Vec<&Span> = spans.iter().filter(|s| !s.is_blank()).collect();
        if visible.is_empty() {
            return None;
        }

        let text: String = spans.iter().map(|s| s.text.as_str()).collect();
        let size = visible.iter().map(|s| s.size).sum::<f32>() / visible.len() as f32;
        let bold = visible.iter().any(|s| s.is_bold());

        Some(Self::new(text, size, bold, page, bbox))
    }
}

/// Serialized form of a [`Fragment`].
#[derive(Deserialize)]
struct FragmentRecord {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    size: Option<f32>,
    #[serde(default)]
    bold: bool,
    #[serde(default)]
    spans: Vec<Span>,
    page: u32,
    bbox: BBox,
    #[serde(default)]
    block: u32,
}

impl TryFrom<FragmentRecord> for Fragment {
    type Error = String;

    fn try_from(record: FragmentRecord) -> Result<Self, Self::Error> {
        let FragmentRecord {
            text,
            size,
            bold,
            spans,
            page,
            bbox,
            block,
        } = record;

        let fragment = match (text, size) {
            (Some(text), Some(size)) => Fragment::new(text, size, bold, page, bbox),
            (Some(_), None) => return Err("fragment with `text` is missing `size`".to_string()),
            (None, _) if !spans.is_empty() => {
                // All-blank lines keep empty text; the assembler drops them.
                Fragment::from_spans(&spans, page, bbox)
                    .unwrap_or_else(|| Fragment::new("", 0.0, false, page, bbox))
            }
            (None, _) => return Err("fragment needs `text` and `size`, or `spans`".to_string()),
        };

        Ok(fragment.in_block(block))
    }
}

/// Page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page index (same base as [`Fragment::page`])
    pub index: u32,
    /// Page width in layout units
    #[serde(default)]
    pub width: f32,
    /// Page height in layout units
    #[serde(default)]
    pub height: f32,
}

impl PageInfo {
    /// Create page info.
    pub fn new(index: u32, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
        }
    }

    /// A4 portrait page (595 x 842 points).
    pub fn a4(index: u32) -> Self {
        Self::new(index, 595.0, 842.0)
    }

    /// US Letter portrait page (612 x 792 points).
    pub fn letter(index: u32) -> Self {
        Self::new(index, 612.0, 792.0)
    }
}

/// One entry of an embedded table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Nesting level (1 = top level)
    pub level: u32,
    /// Entry text
    pub text: String,
    /// Target page (same base as [`Fragment::page`])
    pub page: u32,
}

impl TocEntry {
    /// Create a TOC entry.
    pub fn new(level: u32, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Everything the pipeline needs to know about one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Title from the document information dictionary, if any
    #[serde(default)]
    pub metadata_title: Option<String>,

    /// Page geometry
    #[serde(default)]
    pub pages: Vec<PageInfo>,

    /// Text fragments in extractor order
    #[serde(default)]
    pub fragments: Vec<Fragment>,

    /// Embedded table of contents, if any
    #[serde(default)]
    pub toc: Option<Vec<TocEntry>>,
}

impl SourceDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    pub fn add_page(&mut self, page: PageInfo) {
        self.pages.push(page);
    }

    /// Add a fragment.
    pub fn add_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Set the embedded table of contents.
    pub fn with_toc(mut self, toc: Vec<TocEntry>) -> Self {
        self.toc = Some(toc);
        self
    }

    /// Set the metadata title.
    pub fn with_metadata_title(mut self, title: impl Into<String>) -> Self {
        self.metadata_title = Some(title.into());
        self
    }

    /// Get page geometry by index.
    pub fn page(&self, index: u32) -> Option<&PageInfo> {
        self.pages.iter().find(|p| p.index == index)
    }

    /// Whether `index` names a page of this document.
    ///
    /// When no page geometry was supplied every index is accepted.
    pub fn has_page(&self, index: u32) -> bool {
        self.pages.is_empty() || self.page(index).is_some()
    }

    /// Number of known pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the extractor produced no text at all.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}
