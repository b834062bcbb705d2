//! Command line argument parsing for the scgview CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_DATA_DIR, DemoConfig};
use crate::grammar::DEFAULT_SLOT_CONSTRAINTS;
use crate::model::Model;

/// scgview - browse pre-generated sentences by semantic control grammar
#[derive(Parser, Debug, Clone)]
#[command(name = "scgview")]
#[command(about = "Browse pre-generated sentences by semantic control grammar")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ScgArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory holding the vocabularies and per-model tables
    #[arg(long, env = "SCGVIEW_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ScgArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }

    pub fn config(&self) -> DemoConfig {
        DemoConfig::with_data_dir(&self.data_dir)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List selectable intents
    Intents,

    /// List slot tags
    #[command(name = "slot-tags")]
    SlotTags,

    /// Show slot tags with their allowed values
    Slots,

    /// Show sample grammars
    Templates,

    /// Compose a semantic control grammar without looking it up
    Compose(ComposeArgs),

    /// Look up pre-generated sentences for a grammar
    Generate(GenerateArgs),
}

/// Intent and slot selection shared by `compose` and `generate`.
#[derive(Parser, Debug, Clone)]
pub struct ComposeArgs {
    /// Intent, one of `scgview intents`
    #[arg(short, long)]
    pub intent: String,

    /// Slot tags and values, e.g. `day.p=내일,location=*`
    #[arg(short, long, default_value = DEFAULT_SLOT_CONSTRAINTS)]
    pub slots: String,
}

/// Arguments for a lookup
#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Model whose table is searched
    #[arg(short, long, default_value = "t5")]
    pub model: Model,

    /// Number of sentences to return
    #[arg(short = 'n', long, default_value = "0")]
    pub count: usize,

    #[command(flatten)]
    pub grammar: ComposeArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}
