//! Body text statistics: baseline font size and left-edge indentation.

use std::collections::HashMap;

use crate::model::Line;

use super::options::PipelineOptions;

/// Baseline body font size of a document.
///
/// Mode of the rounded sizes of paragraph-length lines, falling back to the
/// mode over all lines and then to the configured nominal size. Halves round
/// to even, so 10.5pt body text gives a 10pt baseline.
pub fn estimate_body_size(lines: &[Line], options: &PipelineOptions) -> f32 {
    let paragraph_sizes: Vec<i64> = lines
        .iter()
        .filter(|l| l.char_count() > options.paragraph_min_chars)
        .map(|l| l.size.round_ties_even() as i64)
        .collect();

    if let Some(size) = mode(&paragraph_sizes) {
        return size as f32;
    }

    let all_sizes: Vec<i64> = lines
        .iter()
        .map(|l| l.size.round_ties_even() as i64)
        .collect();
    match mode(&all_sizes) {
        Some(size) => size as f32,
        None => options.default_body_size,
    }
}

/// Most frequent value; ties go to the value seen first.
fn mode(values: &[i64]) -> Option<i64> {
    let mut histogram: HashMap<i64, (usize, usize)> = HashMap::new();
    for (index, value) in values.iter().enumerate() {
        histogram.entry(*value).or_insert((0, index)).0 += 1;
    }

    histogram
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value)
}

/// Mean and spread of body-text left edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndentStats {
    /// Mean left x of long lines
    pub mean: f32,
    /// Sample standard deviation of left x of long lines
    pub stdev: f32,
}

impl IndentStats {
    /// Compute from lines longer than `indent_sample_min_chars`.
    pub fn from_lines(lines: &[Line], options: &PipelineOptions) -> Self {
        let xs: Vec<f32> = lines
            .iter()
            .filter(|l| l.char_count() > options.indent_sample_min_chars)
            .map(|l| l.x0())
            .collect();

        let mean = if xs.is_empty() {
            options.default_indent_mean
        } else {
            xs.iter().sum::<f32>() / xs.len() as f32
        };

        let stdev = if xs.len() > 1 {
            let variance =
                xs.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / (xs.len() - 1) as f32;
            variance.sqrt()
        } else {
            options.default_indent_stdev
        };

        Self { mean, stdev }
    }

    /// Coarse indentation bucket of a left edge: 0, 1 or 2.
    pub fn tier(&self, x0: f32, options: &PipelineOptions) -> u8 {
        if x0 > self.mean + self.stdev * options.indent_tier2_sigmas {
            2
        } else if x0 > self.mean + self.stdev * options.indent_tier1_sigmas {
            1
        } else {
            0
        }
    }
}
