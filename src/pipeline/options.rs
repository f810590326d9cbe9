//! Pipeline options and configuration.
//!
//! Every empirical constant of the heuristics lives here so that callers can
//! tune them per corpus. `Default` yields the documented values.

use crate::model::HeadingLevel;

/// Options for outline inference.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOptions {
    /// Max vertical distance between fragment tops for a merge
    pub merge_y_tolerance: f32,

    /// Max font-size difference for a merge
    pub merge_size_tolerance: f32,

    /// Fragments shorter than this (after cleaning) are dropped
    pub min_line_chars: usize,

    /// Lines longer than this count as body paragraphs for the body size
    pub paragraph_min_chars: usize,

    /// Lines longer than this feed the indentation statistics
    pub indent_sample_min_chars: usize,

    /// Size ratio over body size that makes a line a heading candidate
    pub heading_size_ratio: f32,

    /// Minimum word count of a heading candidate
    pub min_heading_words: usize,

    /// Maximum character count of a heading candidate
    pub max_heading_chars: usize,

    /// Standard deviations above mean indentation for tier 1
    pub indent_tier1_sigmas: f32,

    /// Standard deviations above mean indentation for tier 2
    pub indent_tier2_sigmas: f32,

    /// Font sizes are rounded to a multiple of this when clustering
    pub size_rounding_step: f32,

    /// Deepest level the heuristic assigns
    pub max_level: HeadingLevel,

    /// Fraction of the first page (from the top) searched for the title
    pub title_region_ratio: f32,

    /// Lines within this ratio of the largest size compete for the title
    pub title_size_ratio: f32,

    /// Lines used when the title region is empty
    pub title_fallback_lines: usize,

    /// Page width assumed when the extractor reports none
    pub default_page_width: f32,

    /// Body size assumed for documents without lines
    pub default_body_size: f32,

    /// Indentation mean assumed without body samples
    pub default_indent_mean: f32,

    /// Indentation stdev assumed with fewer than two body samples
    pub default_indent_stdev: f32,

    /// Whether an embedded TOC may replace the heuristic outline
    pub use_toc: bool,

    /// Minimum number of (filtered) TOC entries to trust the TOC
    pub min_toc_entries: usize,

    /// Deepest TOC level kept
    pub max_toc_level: u32,

    /// Minimum word count of a kept TOC entry
    pub toc_min_words: usize,

    /// TOC entries must be shorter than this
    pub max_toc_chars: usize,

    /// Whether a plausible metadata title overrides the layout title
    pub use_metadata_title: bool,

    /// Order of heuristic entries before normalization
    pub outline_order: OutlineOrder,

    /// Noise classification rules
    pub noise: NoiseConfig,
}

impl PipelineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deepest heuristic level (H1 keeps everything flat).
    pub fn with_max_level(mut self, level: HeadingLevel) -> Self {
        self.max_level = level;
        self
    }

    /// Ignore any embedded TOC.
    pub fn without_toc(mut self) -> Self {
        self.use_toc = false;
        self
    }

    /// Ignore the metadata title.
    pub fn without_metadata_title(mut self) -> Self {
        self.use_metadata_title = false;
        self
    }

    /// Set the line merge tolerances.
    pub fn with_merge_tolerance(mut self, y: f32, size: f32) -> Self {
        self.merge_y_tolerance = y;
        self.merge_size_tolerance = size;
        self
    }

    /// Set the heading size ratio.
    pub fn with_heading_size_ratio(mut self, ratio: f32) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    /// Set the indentation tier thresholds, in standard deviations.
    pub fn with_indent_tiers(mut self, tier1: f32, tier2: f32) -> Self {
        self.indent_tier1_sigmas = tier1;
        self.indent_tier2_sigmas = tier2.max(tier1);
        self
    }

    /// Set the size rounding step used by the style clusterer.
    pub fn with_size_rounding(mut self, step: f32) -> Self {
        self.size_rounding_step = step;
        self
    }

    /// Set the minimum word count for TOC entries.
    pub fn with_toc_min_words(mut self, words: usize) -> Self {
        self.toc_min_words = words;
        self
    }

    /// Set the heuristic outline order.
    pub fn with_outline_order(mut self, order: OutlineOrder) -> Self {
        self.outline_order = order;
        self
    }

    /// Set noise rules.
    pub fn with_noise(mut self, noise: NoiseConfig) -> Self {
        self.noise = noise;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            merge_y_tolerance: 5.0,
            merge_size_tolerance: 0.5,
            min_line_chars: 3,
            paragraph_min_chars: 150,
            indent_sample_min_chars: 100,
            heading_size_ratio: 1.2,
            min_heading_words: 2,
            max_heading_chars: 150,
            indent_tier1_sigmas: 1.0,
            indent_tier2_sigmas: 3.0,
            size_rounding_step: 0.5,
            max_level: HeadingLevel::H3,
            title_region_ratio: 0.25,
            title_size_ratio: 0.9,
            title_fallback_lines: 5,
            default_page_width: 595.0,
            default_body_size: 12.0,
            default_indent_mean: 20.0,
            default_indent_stdev: 10.0,
            use_toc: true,
            min_toc_entries: 3,
            max_toc_level: 3,
            toc_min_words: 1,
            max_toc_chars: 150,
            use_metadata_title: true,
            outline_order: OutlineOrder::PageThenLevel,
            noise: NoiseConfig::default(),
        }
    }
}

/// Order of heuristic outline entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutlineOrder {
    /// Page ascending, then level ascending within a page
    #[default]
    PageThenLevel,
    /// Page ascending, reading order within a page
    Reading,
}

/// Rules of the noise classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    /// Lines shorter than this are noise
    pub min_chars: usize,

    /// Lines whose lowercase text occurs more often than this are noise
    pub max_repeats: usize,

    /// Boilerplate substrings (lowercase)
    pub boilerplate_keywords: Vec<String>,

    /// Tabular column header substrings (lowercase)
    pub column_keywords: Vec<String>,

    /// Street-address words (matched case-insensitively on word boundaries)
    pub address_keywords: Vec<String>,

    /// Max words of an all-uppercase stamp line
    pub max_stamp_words: usize,

    /// Max length of a single uppercase token treated as an acronym
    pub max_acronym_chars: usize,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| w.to_string()).collect()
        }

        Self {
            min_chars: 5,
            max_repeats: 2,
            boilerplate_keywords: owned(&[
                "overview", "email", "date", "rsvp", "address", "version", "waiver", "phone",
                "fax",
            ]),
            column_keywords: owned(&["s.no", "name", "age", "relationship", "dob", "gender"]),
            address_keywords: owned(&[
                "Street",
                "St.",
                "Road",
                "Rd.",
                "Avenue",
                "Suite",
                "Parkway",
                "Boulevard",
            ]),
            max_stamp_words: 4,
            max_acronym_chars: 20,
        }
    }
}
