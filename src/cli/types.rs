use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI parser structure
#[derive(Parser)]
#[command(name = "tocsmith")]
#[command(about = "Build-time tables of contents for static blog posts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Source directory (defaults to ./)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub source: Option<PathBuf>,

    /// Destination directory (defaults to ./_site)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub destination: Option<PathBuf>,

    /// Custom configuration file
    #[arg(long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<Vec<PathBuf>>,

    /// Show the full backtrace when an error occurs
    #[arg(short, long, default_value_t = false, global = true)]
    pub trace: bool,

    /// Enable verbose debugging
    #[arg(short = 'g', long, default_value_t = false, global = true)]
    pub debug: bool,

    /// Only report errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,
}

/// Subcommands for the CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Build tables of contents for the post pages of an already built site
    #[command(alias = "a")]
    Apply {
        /// Site directory (defaults to the configured destination)
        dir: Option<PathBuf>,
    },

    /// Render markdown posts and build their tables of contents
    #[command(alias = "b")]
    Build {
        /// Render posts that were not marked as published
        #[arg(long, default_value_t = false)]
        unpublished: bool,
    },

    /// Start a new unpublished post in the posts directory
    #[command(alias = "n")]
    New {
        /// Post title, also used for the file name
        title: String,

        /// Overwrite a post with the same file name
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Create the directory layout and configuration of a new blog
    Init {
        /// Where to create the blog
        path: PathBuf,

        /// Site title written to the configuration
        #[arg(long)]
        title: Option<String>,

        /// Continue even if PATH exists and is not empty
        #[arg(long, default_value_t = false)]
        force: bool,
    },

    /// Print the headings and entries of one page as JSON without writing it
    #[command(alias = "i")]
    Inspect {
        /// HTML page to inspect
        file: PathBuf,

        /// Route the page is served under (defaults to the file path)
        #[arg(short, long, value_name = "PATH")]
        route: Option<String>,
    },
}
