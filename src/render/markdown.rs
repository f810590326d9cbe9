//! Markdown rendering for outline results.

use crate::error::Result;
use crate::model::{OutlineNode, OutlineResult};

use super::RenderOptions;

/// Convert an outline result to Markdown.
///
/// The title becomes a level-1 heading; the outline becomes a nested bullet
/// list.
pub fn to_markdown(result: &OutlineResult, options: &RenderOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(result)
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render an outline result to Markdown.
    pub fn render(&self, result: &OutlineResult) -> Result<String> {
        let mut output = String::new();

        if self.options.include_title && !result.title.is_empty() {
            output.push_str("# ");
            output.push_str(&self.text(&result.title));
            output.push_str("\n\n");
        }

        for node in result.to_tree() {
            self.render_node(&mut output, &node, 0);
        }

        Ok(output.trim_end().to_string())
    }

    fn render_node(&self, output: &mut String, node: &OutlineNode, depth: usize) {
        if node.entry.level > self.options.max_level {
            return;
        }

        output.push_str(&self.options.indent(depth));
        output.push(self.options.list_marker);
        output.push(' ');
        output.push_str(&self.text(&node.entry.text));
        if self.options.include_pages {
            output.push_str(&format!(" (p. {})", node.entry.page));
        }
        output.push('\n');

        for child in &node.children {
            self.render_node(output, child, depth + 1);
        }
    }

    fn text(&self, text: &str) -> String {
        if self.options.escape_special_chars {
            escape_markdown(text)
        } else {
            text.to_string()
        }
    }
}

/// Escape special Markdown characters.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}
