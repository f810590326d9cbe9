//! Directory batch processing.
//!
//! Every `*.json` layout dump in an input directory is run through the
//! pipeline and written as `<stem>.json` to an output directory. A document
//! that cannot be read still gets an (empty) output file; its failure is
//! only recorded in the [`BatchReport`].

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::OutlineResult;
use crate::pipeline::{Outliner, PipelineOptions};
use crate::render::{to_json, JsonFormat};

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process documents in parallel
    pub parallel: bool,

    /// Formatting of the written results
    pub json_format: JsonFormat,

    /// Extension of input files (case-insensitive, without the dot)
    pub extension: String,

    /// Pipeline configuration shared by all documents
    pub pipeline: PipelineOptions,
}

impl BatchOptions {
    /// Create batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the output JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set the input file extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Set the pipeline options.
    pub fn with_pipeline(mut self, pipeline: PipelineOptions) -> Self {
        self.pipeline = pipeline;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            json_format: JsonFormat::Pretty,
            extension: "json".to_string(),
            pipeline: PipelineOptions::default(),
        }
    }
}

/// Outcome of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    /// Outline extracted and written
    Succeeded,
    /// Source unreadable or output not writable
    Failed(String),
}

impl DocumentStatus {
    /// Check if the document succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }
}

/// Per-document entry of a batch report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Input file
    pub source: PathBuf,
    /// Written result file
    pub output: PathBuf,
    /// Outcome
    pub status: DocumentStatus,
    /// Resolved title
    pub title: String,
    /// Number of outline entries written
    pub heading_count: usize,
    /// Processing time in milliseconds
    pub elapsed_ms: u64,
}

/// Summary of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Start of the run
    pub started_at: DateTime<Utc>,
    /// End of the run
    pub finished_at: DateTime<Utc>,
    /// Input directory
    pub input_dir: PathBuf,
    /// Output directory
    pub output_dir: PathBuf,
    /// One entry per input file, in file name order
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    /// Number of processed documents.
    pub fn total(&self) -> usize {
        self.documents.len()
    }

    /// Number of documents that succeeded.
    pub fn succeeded(&self) -> usize {
        self.documents.iter().filter(|d| d.status.is_success()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Total number of headings written.
    pub fn heading_count(&self) -> usize {
        self.documents.iter().map(|d| d.heading_count).sum()
    }

    /// Wall-clock duration of the run in milliseconds.
    pub fn elapsed_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Input files of `input_dir` with the given extension, sorted by path.
pub fn list_inputs(input_dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(input_dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if path.is_file() && matches {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Process every input file of `input_dir` into `output_dir`.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
) -> Result<BatchReport> {
    run_batch_with_progress(input_dir, output_dir, options, |_| {})
}

/// Like [`run_batch`], calling `progress` after each finished document.
///
/// # Errors
///
/// Fails if the input directory cannot be listed, if the output directory
/// resolves to the input directory, or if the output directory cannot be
/// created. Per-document failures are reported, not returned.
pub fn run_batch_with_progress<F>(
    input_dir: &Path,
    output_dir: &Path,
    options: &BatchOptions,
    progress: F,
) -> Result<BatchReport>
where
    F: Fn(&DocumentReport) + Sync,
{
    let started_at = Utc::now();

    let input = fs::canonicalize(input_dir)?;
    if output_dir.exists() && fs::canonicalize(output_dir)? == input {
        return Err(Error::InvalidInput(format!(
            "output directory must differ from input directory: {}",
            input_dir.display()
        )));
    }

    let inputs = list_inputs(input_dir, &options.extension)?;
    fs::create_dir_all(output_dir)?;

    if inputs.is_empty() {
        log::warn!(
            "No .{} files found in {}",
            options.extension,
            input_dir.display()
        );
    } else {
        log::info!("Found {} documents to process", inputs.len());
    }

    let outliner = Outliner::with_options(options.pipeline.clone());
    let process = |path: &PathBuf| {
        let report = process_document(path, output_dir, &outliner, options.json_format);
        progress(&report);
        report
    };

    let documents: Vec<DocumentReport> = if options.parallel {
        inputs.par_iter().map(process).collect()
    } else {
        inputs.iter().map(process).collect()
    };

    Ok(BatchReport {
        started_at,
        finished_at: Utc::now(),
        input_dir: input_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        documents,
    })
}

/// Path of the result file for `source`.
pub fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}.json", stem))
}

fn process_document(
    source: &Path,
    output_dir: &Path,
    outliner: &Outliner,
    format: JsonFormat,
) -> DocumentReport {
    let start = Instant::now();
    let output = output_path(source, output_dir);

    let (result, mut status) = match crate::load_source_file(source) {
        Ok(doc) => (outliner.extract(&doc), DocumentStatus::Succeeded),
        Err(e) => {
            log::warn!("Failed to read {}: {}", source.display(), e);
            (OutlineResult::empty(), DocumentStatus::Failed(e.to_string()))
        }
    };

    if let Err(e) = write_result(&result, &output, format) {
        log::warn!("Failed to write {}: {}", output.display(), e);
        status = DocumentStatus::Failed(e.to_string());
    } else {
        log::info!("Output saved to {}", output.display());
    }

    DocumentReport {
        source: source.to_path_buf(),
        output,
        status,
        title: result.title,
        heading_count: result.outline.len(),
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}

fn write_result(result: &OutlineResult, output: &Path, format: JsonFormat) -> Result<()> {
    let json = to_json(result, format)?;
    fs::write(output, json)?;
    Ok(())
}
