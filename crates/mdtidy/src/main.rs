//! mdtidy CLI - frontmatter and code fence normalizer for Markdown/MDX content.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use config::ConfigFile;

#[derive(Parser)]
#[command(name = "mdtidy")]
#[command(about = "Frontmatter and code fence normalizer for Markdown/MDX content")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to mdtidy.toml config file
    #[arg(short, long, default_value = "mdtidy.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert the missing opening `---` in frontmatter that only has a closing one
    FixFences {
        /// Content directory (defaults to config or "src/content/post/moon")
        dir: Option<PathBuf>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Add minimal frontmatter to documents that have none
    AddFrontmatter {
        /// Content directory (defaults to config or "src/content/post/moon")
        dir: Option<PathBuf>,

        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// List code fence language tags that are not in canonical form
    CodeLangs {
        /// Content directory (defaults to config or "src/content/post/moon")
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config = ConfigFile::load(&cli.config)?;
    let cwd = env::current_dir().context("Failed to read current directory")?;

    // Execute command
    match cli.command {
        Commands::FixFences { dir, dry_run } => {
            commands::fix_fences::run(cwd.join(config.content_dir(dir)), dry_run)?;
        }
        Commands::AddFrontmatter { dir, dry_run } => {
            commands::add_frontmatter::run(cwd.join(config.content_dir(dir)), dry_run)?;
        }
        Commands::CodeLangs { dir } => {
            commands::code_langs::run(cwd.join(config.content_dir(dir)))?;
        }
    }

    Ok(())
}
