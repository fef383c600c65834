//! Command-line interface definitions for charpage

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure for the charpage application
#[derive(Parser)]
#[command(name = "charpage")]
#[command(version)]
#[command(about = "Character profile page generator", long_about = None)]
pub struct Cli {
    /// Path to charpage.toml (defaults to ./charpage.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for charpage
#[derive(Subcommand)]
pub enum Commands {
    /// Create a save file holding the sample document
    Init {
        /// File or directory to create (defaults to ./charpage.json)
        path: Option<PathBuf>,

        /// Theme preset for the new document (see list-themes)
        #[arg(short, long)]
        preset: Option<String>,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Render a save file, or every save file in a directory, to HTML
    Build {
        /// Save file or directory of save files
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Output file (single input) or directory (directory input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace theme values outside the safe color grammar with defaults
        #[arg(long)]
        strict_theme: bool,

        /// Value of the <html lang> attribute
        #[arg(long)]
        lang: Option<String>,
    },

    /// Rewrite a save file in the current format
    Migrate {
        /// Save file to read
        #[arg(value_name = "PATH")]
        input: PathBuf,

        /// Where to write the migrated file (defaults to overwriting the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a save file loads and report its contents
    Validate {
        /// Save file to check
        #[arg(value_name = "PATH")]
        input: PathBuf,
    },

    /// List built-in theme presets
    ListThemes,
}
