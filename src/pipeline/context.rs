//! Per-document statistics shared by the classification stages.

use crate::model::Line;

use super::body_style::{estimate_body_size, IndentStats};
use super::noise::TextFrequency;
use super::options::PipelineOptions;

/// Immutable statistics computed once per document and passed to every
/// classifier call.
#[derive(Debug, Clone)]
pub struct DocumentContext {
    /// Occurrences of each lowercased line text
    pub frequency: TextFrequency,
    /// Baseline body font size
    pub body_size: f32,
    /// Body-text indentation statistics
    pub indent: IndentStats,
}

impl DocumentContext {
    /// Compute the context of an assembled document.
    pub fn from_lines(lines: &[Line], options: &PipelineOptions) -> Self {
        let context = Self {
            frequency: TextFrequency::from_lines(lines),
            body_size: estimate_body_size(lines, options),
            indent: IndentStats::from_lines(lines, options),
        };

        log::debug!(
            "DocumentContext: body size {}, indent mean {:.1} stdev {:.1}, {} distinct texts",
            context.body_size,
            context.indent.mean,
            context.indent.stdev,
            context.frequency.distinct()
        );

        context
    }
}
