//! Command-line interface for the extractor.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::BatchRunner;
use crate::config::{
    validate_namespace, ExtractorConfig, DEFAULT_CSV_DIR, DEFAULT_MERGE_INPUT_DIR,
    DEFAULT_MERGE_OUTPUT, DEFAULT_NAMESPACE, DEFAULT_XML_DIR,
};
use crate::error::Result;
use crate::merge::merge_tables;

/// Transkribus extractor - Turn PAGE-XML newspaper pages into CSV tables.
#[derive(Parser)]
#[command(name = "transkribus-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract every PAGE-XML document under a directory into one CSV per page.
    Extract {
        /// Directory searched recursively for XML documents
        #[arg(short, long, default_value = DEFAULT_XML_DIR)]
        input: PathBuf,

        /// Directory receiving the CSV tables
        #[arg(short, long, default_value = DEFAULT_CSV_DIR)]
        output: PathBuf,

        /// PAGE namespace URI
        #[arg(short, long, default_value = DEFAULT_NAMESPACE)]
        namespace: String,
    },

    /// Merge every CSV table in a directory into one table.
    Merge {
        /// Directory holding the per-page tables
        #[arg(short, long, default_value = DEFAULT_MERGE_INPUT_DIR)]
        input: PathBuf,

        /// Consolidated output table
        #[arg(short, long, default_value = DEFAULT_MERGE_OUTPUT)]
        output: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            input,
            output,
            namespace,
        } => extract_command(input, output, namespace),
        Commands::Merge { input, output } => merge_command(&input, &output),
    }
}

/// Execute the extract command.
fn extract_command(input: PathBuf, output: PathBuf, namespace: String) -> Result<()> {
    validate_namespace(&namespace)?;

    let config = ExtractorConfig::new(input, output).with_namespace(namespace);
    let runner = BatchRunner::new(config);

    let documents = runner.discover();
    if documents.is_empty() {
        println!(
            "{} in {}",
            style("No XML files found").yellow().bold(),
            runner.config().xml_dir.display()
        );
        return Ok(());
    }

    println!(
        "{} {} documents from {}",
        style("Extracting").bold(),
        style(documents.len()).cyan(),
        style(runner.config().xml_dir.display()).green()
    );

    let pb = ProgressBar::new(documents.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .expect("valid template"),
    );

    let summary = match runner.run_documents(documents, |outcome| {
        if let Err(e) = &outcome.result {
            pb.println(format!(
                "{} {}: {e}",
                style("Error processing").red(),
                outcome.path.display()
            ));
        }
        pb.set_message(
            outcome
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        pb.inc(1);
    }) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    println!("  Succeeded: {}", style(summary.succeeded()).green());
    println!("  Rows: {}", summary.total_rows());
    let failed = summary.failed();
    if !failed.is_empty() {
        println!("  Failed: {}", style(failed.len()).yellow().bold());
    }
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        runner.config().csv_dir.display()
    );

    Ok(())
}

/// Execute the merge command.
fn merge_command(input: &std::path::Path, output: &std::path::Path) -> Result<()> {
    println!(
        "{} {}",
        style("Reading CSV files from:").bold(),
        input.display()
    );

    let summary = merge_tables(input, output)?;

    for (path, e) in &summary.skipped {
        println!("{} {}: {e}", style("Error reading").red(), path.display());
    }

    match &summary.output {
        Some(path) => println!(
            "{} {} files ({} rows) into {}",
            style("Merged").green().bold(),
            summary.merged.len(),
            summary.rows,
            path.display()
        ),
        None => println!("{}", style("No valid CSV files to merge.").yellow()),
    }

    Ok(())
}
