//! Rendering options and configuration.

use crate::model::HeadingLevel;

/// Options for rendering an outline.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Emit the document title above the outline
    pub include_title: bool,

    /// Append page references to each heading
    pub include_pages: bool,

    /// Spaces per nesting level
    pub indent_width: usize,

    /// Deepest level to render; deeper headings are omitted
    pub max_level: HeadingLevel,

    /// Character to use for Markdown list markers
    pub list_marker: char,

    /// Escape special Markdown characters in heading text
    pub escape_special_chars: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the title line.
    pub fn with_title(mut self, include: bool) -> Self {
        self.include_title = include;
        self
    }

    /// Enable or disable page references.
    pub fn with_pages(mut self, include: bool) -> Self {
        self.include_pages = include;
        self
    }

    /// Set the indentation width per level.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the deepest rendered level.
    pub fn with_max_level(mut self, level: HeadingLevel) -> Self {
        self.max_level = level;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Indentation prefix for a tree depth (0 for top-level headings).
    pub(crate) fn indent(&self, depth: usize) -> String {
        " ".repeat(self.indent_width * depth)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_title: true,
            include_pages: true,
            indent_width: 2,
            max_level: HeadingLevel::H4,
            list_marker: '-',
            escape_special_chars: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert!(options.include_title);
        assert!(options.include_pages);
        assert_eq!(options.indent_width, 2);
        assert_eq!(options.max_level, HeadingLevel::H4);
    }

    #[test]
    fn test_builder() {
        let options = RenderOptions::new()
            .with_title(false)
            .with_pages(false)
            .with_indent_width(4)
            .with_max_level(HeadingLevel::H2)
            .with_list_marker('*');
        assert!(!options.include_title);
        assert!(!options.include_pages);
        assert_eq!(options.indent(0), "");
        assert_eq!(options.indent(2), "        ");
        assert_eq!(options.list_marker, '*');
    }
}
