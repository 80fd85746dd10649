//! Quill CLI - CMS rich-text and layout renderer.
//!
//! Provides commands for:
//! - `render`: Lexical document to sanitized HTML
//! - `plain-text`: Lexical document to plain text
//! - `excerpt`: word-limited summary of a Lexical document
//! - `layout`: page or post layout blocks to HTML

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{DocumentArgs, ExcerptArgs, LayoutArgs};
use output::Output;

/// Quill - CMS rich-text and layout renderer.
#[derive(Parser)]
#[command(name = "quill", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long, global = true, env = "QUILL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (log archive queries and skipped content).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a Lexical document to HTML.
    Render(DocumentArgs),
    /// Extract the plain text of a Lexical document.
    PlainText(DocumentArgs),
    /// Build a word-limited excerpt of a Lexical document.
    Excerpt(ExcerptArgs),
    /// Render the hero and layout blocks of a page or post to HTML.
    Layout(LayoutArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Render(args) => args.render(),
        Commands::PlainText(args) => args.plain_text(),
        Commands::Excerpt(args) => args.execute(config),
        Commands::Layout(args) => args.execute(config, &output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        default_filter().from_env_lossy()
    }
}

fn default_filter() -> tracing_subscriber::filter::Builder {
    EnvFilter::builder().with_default_directive(LevelFilter::WARN.into())
}
