//! brandsite CLI - generate and publish brand design system sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "brandsite")]
#[command(about = "Generate and publish brand design system sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to brandsite.toml config file
    #[arg(short, long, default_value = "brandsite.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Client name and theme overrides shared by `generate` and `publish`.
#[derive(Args, Debug, Default, Clone)]
pub struct SiteArgs {
    /// Client display name (defaults to config)
    #[arg(short, long)]
    name: Option<String>,

    /// Primary color, e.g. #1a1a1a
    #[arg(long)]
    primary: Option<String>,

    /// Secondary color
    #[arg(long)]
    secondary: Option<String>,

    /// Accent color
    #[arg(long)]
    accent: Option<String>,

    /// Muted color
    #[arg(long)]
    muted: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default brandsite.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate the site locally
    Generate {
        #[command(flatten)]
        site: SiteArgs,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Minify the stylesheet
        #[arg(long)]
        minify: bool,
    },

    /// Create a GitHub repository for the site and enable Pages
    Publish {
        #[command(flatten)]
        site: SiteArgs,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Open the site in a browser once published
        #[arg(long)]
        open: bool,
    },

    /// Preview a generated site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Generate {
            site,
            output,
            minify,
        } => {
            commands::generate::run(&cli.config, site, output, minify).await?;
        }
        Commands::Publish { site, json, open } => {
            commands::publish::run(&cli.config, site, json, open).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(port, dir, !no_open).await?;
        }
    }

    Ok(())
}
