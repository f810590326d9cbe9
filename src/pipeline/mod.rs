//! Outline inference pipeline.
//!
//! Stages, in order:
//! 1. [`LineAssembler`]: fragments to cleaned, merged lines
//! 2. [`DocumentContext`]: body size, indentation and text frequencies
//! 3. [`CandidateSelector`]: heading candidates, filtered by [`NoiseClassifier`]
//! 4. [`StyleClusterer`]: style clusters mapped to heading levels
//! 5. [`normalize_hierarchy`]: well-nested, duplicate-free outline
//!
//! [`TitleResolver`] runs beside the outline stages, and [`Outliner`] ties
//! everything together, preferring a usable embedded TOC.

mod assembler;
mod body_style;
mod candidates;
mod clustering;
mod context;
mod hierarchy;
mod noise;
mod options;
mod outliner;
mod title;

pub use assembler::{LineAssembler, TextCleaner};
pub use body_style::{estimate_body_size, IndentStats};
pub use candidates::{CandidateSelector, HeadingCandidate};
pub use clustering::{StyleCluster, StyleClusterer, StyleKey};
pub use context::DocumentContext;
pub use hierarchy::{is_well_nested, normalize_hierarchy};
pub use noise::{NoiseClassifier, NoiseReason, TextFrequency};
pub use options::{NoiseConfig, OutlineOrder, PipelineOptions};
pub use outliner::{DocumentAnalysis, Outliner};
pub use title::TitleResolver;
