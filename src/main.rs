//! hdrdoc — generate MDX reference pages from documented C headers.
//!
//! Scans a directory of `.h` files, pairs each function prototype with the
//! `/** ... */` block directly above it, and writes one page per header:
//!
//! `hdrdoc -i headers -o content/docs`

mod error;
mod loader;
mod model;
mod parser;
mod render;
mod toc;
mod writer;

use anyhow::Result;
use clap::Parser;
use error::ExtractError;
use model::ExtractionReport;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "hdrdoc",
    about = "Generate MDX reference pages from documented C header prototypes"
)]
struct Cli {
    /// Directory containing the .h files to document
    #[arg(short = 'i', long, default_value = "headers")]
    input: PathBuf,

    /// Output directory for generated pages
    #[arg(short = 'o', long, default_value = "content/docs")]
    output: PathBuf,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Remove pages generated by earlier runs before writing
    #[arg(long)]
    clean: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(report) => {
            println!(
                "Generated {} function(s) across {} page(s) from {} header file(s)",
                report.functions, report.documents, report.headers
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            let code = err
                .downcast_ref::<ExtractError>()
                .map(ExtractError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("warning: logging was already initialized");
    }
}

/// Process every header in the input directory and write the pages.
fn run(cli: &Cli) -> Result<ExtractionReport> {
    let renderer = render::create_renderer(&cli.format)?;
    let ext = renderer.file_extension();

    let headers = loader::discover(&cli.input)?;
    tracing::info!(
        "Found {} header file(s) in {}",
        headers.len(),
        cli.input.display()
    );

    writer::prepare_output(&cli.output)?;
    if cli.clean {
        let removed = writer::prune_stale(&cli.output, ext)?;
        tracing::info!("Removed {} stale page(s)", removed);
    }
    writer::write_landing(&cli.output)?;

    let mut report = ExtractionReport::default();
    for path in &headers {
        let header = loader::load(path)?;
        report.headers += 1;

        let Some(doc) = render::render_header(&header, renderer.as_ref()) else {
            tracing::info!("{}: no function prototypes, skipping", header.path.display());
            continue;
        };

        for entry in &doc.entries {
            match entry.doc {
                None => tracing::debug!("{}: {} has no doc comment", doc.file_name, entry.name),
                Some(ref c) if c.is_empty() => {
                    tracing::debug!("{}: {} has an empty doc comment", doc.file_name, entry.name)
                }
                Some(_) => {}
            }
        }

        let out_path = writer::write_document(&cli.output, &doc, ext)?;
        let documented = doc.entries.iter().filter(|e| e.has_doc()).count();
        tracing::info!(
            "{}: {} function(s), {} documented -> {}",
            doc.file_name,
            doc.entries.len(),
            documented,
            out_path.display()
        );

        report.documents += 1;
        report.functions += doc.entries.len();
        report.documented += documented;
    }

    if report.functions == 0 {
        return Err(ExtractError::NoFunctionsFound {
            headers: report.headers,
        }
        .into());
    }

    tracing::info!(
        "{} of {} function(s) documented",
        report.documented,
        report.functions
    );
    Ok(report)
}
