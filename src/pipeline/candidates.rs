//! Heading candidate selection.

use crate::model::Line;

use super::context::DocumentContext;
use super::noise::NoiseClassifier;
use super::options::PipelineOptions;

/// A line eligible for level assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    /// The underlying line
    pub line: Line,
    /// Indentation tier relative to body text (0, 1 or 2)
    pub tier: u8,
}

/// Shortlists heading lines.
///
/// Boldness alone is a sufficient style signal: many documents set headings
/// in bold body-size text.
pub struct CandidateSelector<'a> {
    options: &'a PipelineOptions,
    noise: NoiseClassifier,
}

impl<'a> CandidateSelector<'a> {
    /// Create a selector.
    pub fn new(options: &'a PipelineOptions) -> Self {
        Self {
            options,
            noise: NoiseClassifier::new(options.noise.clone()),
        }
    }

    /// Whether a line qualifies as a heading candidate.
    pub fn is_candidate(&self, line: &Line, context: &DocumentContext) -> bool {
        let text = line.text.trim();

        if !text.chars().any(|c| c.is_alphabetic()) {
            return false;
        }
        if line.word_count() < self.options.min_heading_words
            || line.char_count() > self.options.max_heading_chars
        {
            return false;
        }
        if self.noise.is_noise(line, &context.frequency) {
            return false;
        }

        line.size > context.body_size * self.options.heading_size_ratio || line.bold
    }

    /// Select candidates in document order and attach their indentation tier.
    pub fn select(&self, lines: &[Line], context: &DocumentContext) -> Vec<HeadingCandidate> {
        let candidates: Vec<HeadingCandidate> = lines
            .iter()
            .filter(|line| self.is_candidate(line, context))
            .map(|line| HeadingCandidate {
                tier: context.indent.tier(line.x0(), self.options),
                line: line.clone(),
            })
            .collect();

        log::debug!(
            "CandidateSelector: {} of {} lines are heading candidates",
            candidates.len(),
            lines.len()
        );

        candidates
    }
}
