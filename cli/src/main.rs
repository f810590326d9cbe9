//! pdfoutline CLI - title and heading outline inference tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfoutline::batch::{list_inputs, run_batch_with_progress};
use pdfoutline::{
    load_source_file, BatchOptions, DocumentStatus, HeadingLevel, JsonFormat, Outliner,
    PipelineOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "pdfoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Infer titles and heading outlines from PDF layout dumps", long_about = None)]
struct Cli {
    /// Input directory of layout dumps
    #[arg(value_name = "INPUT_DIR")]
    input: Option<PathBuf>,

    /// Output directory for outline JSON files
    #[arg(value_name = "OUTPUT_DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one document as JSON
    Extract {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Render the outline of one document as Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit page references
        #[arg(long)]
        no_pages: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Render the outline of one document as an indented text tree
    Text {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Omit page references
        #[arg(long)]
        no_pages: bool,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Process every layout dump of a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "OUTPUT_DIR")]
        output: PathBuf,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,

        /// Write a JSON batch report to this file
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Show pipeline diagnostics for one document
    Info {
        /// Input layout dump
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Clone, Default)]
struct PipelineArgs {
    /// Ignore the embedded table of contents
    #[arg(long)]
    ignore_toc: bool,

    /// Ignore the metadata title
    #[arg(long)]
    ignore_metadata_title: bool,

    /// Deepest heading level of the inferred outline
    #[arg(long, value_enum, env = "PDFOUTLINE_MAX_LEVEL")]
    max_level: Option<LevelArg>,
}

impl PipelineArgs {
    fn to_options(&self) -> PipelineOptions {
        let mut options = PipelineOptions::new();
        if self.ignore_toc {
            options = options.without_toc();
        }
        if self.ignore_metadata_title {
            options = options.without_metadata_title();
        }
        if let Some(level) = self.max_level {
            options = options.with_max_level(level.into());
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LevelArg {
    /// Top-level headings only
    H1,
    /// Two levels
    H2,
    /// Three levels (default)
    H3,
    /// Four levels
    H4,
}

impl From<LevelArg> for HeadingLevel {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::H1 => HeadingLevel::H1,
            LevelArg::H2 => HeadingLevel::H2,
            LevelArg::H3 => HeadingLevel::H3,
            LevelArg::H4 => HeadingLevel::H4,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            pipeline,
        }) => cmd_extract(&input, output.as_deref(), compact, &pipeline),
        Some(Commands::Markdown {
            input,
            output,
            no_pages,
            pipeline,
        }) => cmd_markdown(&input, output.as_deref(), no_pages, &pipeline),
        Some(Commands::Text {
            input,
            output,
            no_pages,
            pipeline,
        }) => cmd_text(&input, output.as_deref(), no_pages, &pipeline),
        Some(Commands::Batch {
            input,
            output,
            sequential,
            compact,
            report,
            pipeline,
        }) => cmd_batch(
            &input,
            &output,
            sequential,
            compact,
            report.as_deref(),
            &pipeline,
        ),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: batch if both directories are provided
            match (cli.input, cli.output) {
                (Some(input), Some(output)) => cmd_batch(
                    &input,
                    &output,
                    false,
                    false,
                    None,
                    &PipelineArgs::default(),
                ),
                _ => {
                    println!("{}", "Usage: pdfoutline <INPUT_DIR> <OUTPUT_DIR>".yellow());
                    println!("       pdfoutline --help for more information");
                    Ok(())
                }
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    pipeline: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_source_file(input)?;
    let result = Outliner::with_options(pipeline.to_options()).extract(&doc);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = pdfoutline::render::to_json(&result, format)?;
    write_or_print(output, &json)
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    no_pages: bool,
    pipeline: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_source_file(input)?;
    let result = Outliner::with_options(pipeline.to_options()).extract(&doc);

    let render_options = RenderOptions::new().with_pages(!no_pages);
    let markdown = pdfoutline::render::to_markdown(&result, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    no_pages: bool,
    pipeline: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_source_file(input)?;
    let result = Outliner::with_options(pipeline.to_options()).extract(&doc);

    let render_options = RenderOptions::new().with_pages(!no_pages);
    let text = pdfoutline::render::to_text(&result, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    sequential: bool,
    compact: bool,
    report_path: Option<&Path>,
    pipeline: &PipelineArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = BatchOptions::new().with_pipeline(pipeline.to_options());
    if sequential {
        options = options.sequential();
    }
    if compact {
        options = options.with_json_format(JsonFormat::Compact);
    }

    let total = list_inputs(input, &options.extension)?.len();
    log::debug!("batch: {} inputs in {}", total, input.display());

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = run_batch_with_progress(input, output, &options, |doc| {
        if let Some(name) = doc.source.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
        pb.inc(1);
    })?;

    pb.finish_with_message("Done!");

    println!("\n{}", "Batch summary:".green().bold());
    for doc in &report.documents {
        let name = doc.output.file_name().unwrap_or_default().to_string_lossy();
        match &doc.status {
            DocumentStatus::Succeeded => println!(
                "  {} {} ({} headings)",
                "✓".green(),
                name,
                doc.heading_count
            ),
            DocumentStatus::Failed(message) => {
                println!("  {} {} ({})", "✗".red(), name, message.dimmed())
            }
        }
    }
    println!(
        "\n{} {} succeeded, {} failed in {} ms",
        "Done!".green().bold(),
        report.succeeded(),
        report.failed(),
        report.elapsed_ms()
    );

    if let Some(path) = report_path {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("{} {}", "Report saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_source_file(input)?;
    let outliner = Outliner::new();
    let analysis = outliner.analyze(&doc);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Fragments".bold(), analysis.fragment_count);
    if let Some(ref title) = doc.metadata_title {
        println!("{}: {}", "Metadata title".bold(), title);
    }
    println!("{}: {}", "Resolved title".bold(), analysis.title);

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Lines".bold(), analysis.line_count);
    println!("{}: {}", "Body size".bold(), analysis.body_size);
    println!(
        "{}: mean {:.1}, stdev {:.1}",
        "Indentation".bold(),
        analysis.indent.mean,
        analysis.indent.stdev
    );
    println!("{}: {}", "Candidates".bold(), analysis.candidate_count);
    println!(
        "{}: {} of {} usable{}",
        "TOC entries".bold(),
        analysis.usable_toc_entries,
        analysis.toc_entries,
        if analysis.uses_toc { " (used)" } else { "" }
    );

    if !analysis.clusters.is_empty() {
        println!();
        println!("{}", "Style Clusters".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());

        let step = outliner.options().size_rounding_step;
        for cluster in &analysis.clusters {
            println!(
                "{}: size {}{}, tier {}, {} headings",
                cluster.level.to_string().bold(),
                cluster.key.size(step),
                if cluster.key.bold { " bold" } else { "" },
                cluster.key.tier,
                cluster.texts.len()
            );
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Title and heading outline inference tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/pdfoutline".dimmed());
    println!("License: MIT");
}
