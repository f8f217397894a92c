//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat as SettingsFormat};
use crate::types::{Mode, RulesFormat};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for the run command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, the mode output as is
    Text,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

impl From<SettingsFormat> for OutputFormat {
    fn from(format: SettingsFormat) -> Self {
        match format {
            SettingsFormat::Text => OutputFormat::Text,
            SettingsFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorOption> for ColorChoice {
    fn from(color: ColorOption) -> Self {
        match color {
            ColorOption::Auto => ColorChoice::Auto,
            ColorOption::Always => ColorChoice::Always,
            ColorOption::Never => ColorChoice::Never,
        }
    }
}

/// regex-rules CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "regex-rules")]
#[command(about = "Apply ordered regular-expression rule sets to text")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (defaults to ./regex-rules.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output coloring (overrides the settings file)
    #[arg(long, global = true)]
    pub color: Option<ColorChoice>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available regex-rules subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a rule set to input files or stdin
    Run {
        /// Input files (reads stdin when omitted)
        inputs: Vec<PathBuf>,

        /// Rule-set file (JSON or YAML)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Mode: process, validate or generate_document
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Output format
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Validate a rule-set file and summarize it
    Lint {
        /// Rule-set file (JSON or YAML)
        rules: PathBuf,
    },

    /// Print a rule set in another format
    Convert {
        /// Rule-set file (JSON or YAML)
        rules: PathBuf,

        /// Target format (defaults to the other one)
        #[arg(long)]
        to: Option<RulesFormat>,
    },
}
