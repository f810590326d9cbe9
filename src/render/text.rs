//! Plain text rendering for outline results.

use crate::error::Result;
use crate::model::{OutlineNode, OutlineResult};

use super::RenderOptions;

/// Convert an outline result to an indented plain-text tree.
pub fn to_text(result: &OutlineResult, options: &RenderOptions) -> Result<String> {
    let mut output = String::new();

    if options.include_title && !result.title.is_empty() {
        output.push_str(&result.title);
        output.push_str("\n\n");
    }

    for node in result.to_tree() {
        render_node(&mut output, &node, 0, options);
    }

    Ok(output.trim_end().to_string())
}

fn render_node(output: &mut String, node: &OutlineNode, depth: usize, options: &RenderOptions) {
    if node.entry.level > options.max_level {
        return;
    }

    output.push_str(&options.indent(depth));
    output.push_str(&node.entry.text);
    if options.include_pages {
        output.push_str(&format!(" .... {}", node.entry.page));
    }
    output.push('\n');

    for child in &node.children {
        render_node(output, child, depth + 1, options);
    }
}
