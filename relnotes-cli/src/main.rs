//! # relnotes CLI
//!
//! Command-line interface for loading release notes into a documentation site.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use relnotes_core::BuildMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "relnotes.yml")]
    config: PathBuf,

    /// Exclude draft documents
    #[arg(
        long,
        global = true,
        env = "RELNOTES_PRODUCTION",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    production: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new release notes directory
    Init {
        /// Target directory (defaults to current directory)
        path: Option<PathBuf>,
    },

    /// Write release metadata and routes as JSON
    Build {
        /// Output directory
        #[arg(long, default_value = "build/relnotes")]
        out: PathBuf,
    },

    /// List releases and highlights in display order
    List {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single document
    Show {
        /// Document id or permalink
        target: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = ShowFormat::Json)]
        format: ShowFormat,
    },
}

#[derive(Copy, Clone, ValueEnum)]
pub enum ShowFormat {
    /// Metadata record
    Json,
    /// Body with intra-collection links rewritten to permalinks
    Content,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mode = BuildMode::from_production_flag(cli.production);

    match cli.command {
        Commands::Init { path } => commands::init_project(path.as_deref()),
        Commands::Build { out } => commands::build_content(&cli.config, mode, &out),
        Commands::List { json } => commands::list_content(&cli.config, mode, json),
        Commands::Show { target, format } => {
            commands::show_document(&cli.config, mode, &target, format)
        }
    }
}
