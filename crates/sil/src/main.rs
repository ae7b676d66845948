//! SIL CLI - website server and content tools.
//!
//! Provides commands for:
//! - `serve`: Start the website server
//! - `sync`: Copy allow-listed documents from the upstream repository
//! - `frontmatter`: Add frontmatter to documents that lack it
//! - `check`: Report slug collisions, tier disagreements and broken documents

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, FrontmatterArgs, ServeArgs, SyncArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SIL - Semantic Infrastructure Lab website.
#[derive(Parser)]
#[command(name = "sil", version, about)]
struct Cli {
    /// Enable verbose output (info-level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the website server.
    Serve(ServeArgs),
    /// Sync public documents from the upstream content repository.
    Sync(SyncArgs),
    /// Add frontmatter to markdown files that lack it.
    Frontmatter(FrontmatterArgs),
    /// Check content for problems.
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute(VERSION)),
            Err(e) => Err(e.into()),
        },
        Commands::Sync(args) => args.execute(),
        Commands::Frontmatter(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.fail(&err);
        std::process::exit(1);
    }
}
