//! Assembled logical lines.

use super::BBox;

/// One semantic text row, assembled from one or more fragments.
///
/// The text is never empty and carries no leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Cleaned text
    pub text: String,
    /// Average font size of contributing fragments
    pub size: f32,
    /// True if any contributing fragment is bold
    pub bold: bool,
    /// Page index
    pub page: u32,
    /// Union of contributing bounding boxes
    pub bbox: BBox,
    /// Height of the containing page (0 when unknown)
    pub page_height: f32,
}

impl Line {
    /// Number of characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Left edge.
    pub fn x0(&self) -> f32 {
        self.bbox.x0
    }

    /// Top edge.
    pub fn y0(&self) -> f32 {
        self.bbox.y0
    }

    /// Lowercased text, the key used by frequency tables.
    pub fn key(&self) -> String {
        self.text.to_lowercase()
    }
}
