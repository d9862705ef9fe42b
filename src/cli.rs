//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// XML Sitemap - Build and edit sitemaps.org XML sitemaps
#[derive(Parser, Debug)]
#[command(name = "xml-sitemap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a sitemap from a YAML manifest
    Build(commands::build::BuildArgs),

    /// Add URLs to a sitemap file, creating it if needed
    Add(commands::add::AddArgs),

    /// Remove URLs from a sitemap file
    Remove(commands::remove::RemoveArgs),

    /// Refresh the lastmod of URLs in a sitemap file
    Update(commands::update::UpdateArgs),

    /// List the URLs in a sitemap file
    Ls(commands::ls::LsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Build(args) => commands::build::execute(args),
            Commands::Add(args) => commands::add::execute(args),
            Commands::Remove(args) => commands::remove::execute(args),
            Commands::Update(args) => commands::update::execute(args),
            Commands::Ls(args) => commands::ls::execute(args),
        }
    }
}

/// Install the logger. `RUST_LOG`, when set, refines `--log-level`.
fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None);
    // Ignore an already installed logger
    let _ = builder.try_init();
}
