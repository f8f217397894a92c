//! Common helper functions shared across CLI commands
//!
//! This module provides the exit codes, the command error type and the
//! helpers for loading settings, rule sets and inputs.

use crate::cli::args::ColorChoice;
use crate::config::Settings;
use crate::error::{ConfigError, EngineError, SchemaError, SerializeError};
use crate::rules::{RulesConfig, detect_and_validate, validate_as};
use crate::types::RulesFormat;
use std::fmt;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

/// Exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_BROKEN: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Input name used for stdin
pub const STDIN_NAME: &str = "-";

/// Error type shared by the CLI commands
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{}: {source}", .path.display())]
    Rules { path: PathBuf, source: SchemaError },

    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("Failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("No rule set given. Pass --rules or set settings.rules in regex-rules.toml")]
    MissingRules,

    #[error("Failed to serialize rule set: {0}")]
    Serialize(#[from] SerializeError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Maps the error to a process exit code
    ///
    /// Problems with the rule set or the settings file syntax are parse
    /// errors; everything else is a general error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Rules { .. }
            | CliError::Config(ConfigError::Parse(_))
            | CliError::Engine(EngineError::Schema(_))
            | CliError::Engine(EngineError::Pattern(_)) => EXIT_PARSE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Load the settings file
///
/// # Errors
///
/// Returns `CliError::Config` wrapping `ConfigError::Io` if an explicit
/// settings file cannot be read, or `ConfigError::Parse` if the file is
/// invalid TOML.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    Ok(Settings::discover(path)?)
}

/// Resolves the color choice, command line first
pub fn resolve_color(flag: Option<ColorChoice>, settings: Option<&Settings>) -> ColorChoice {
    flag.or_else(|| settings.map(|s| s.output.color.into()))
        .unwrap_or(ColorChoice::Auto)
}

/// Format named by a rule-set file's extension, if any
pub(crate) fn extension_format(path: &Path) -> Option<RulesFormat> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(RulesFormat::from_extension)
}

/// Load and validate a rule-set file
///
/// The format is always detected from the content. The extension only
/// names the format of an empty file and, when detection fails, which
/// validator's detailed error is logged as a warning.
///
/// # Errors
///
/// Returns `CliError::Read` if the file cannot be read and `CliError::Rules`
/// if it is not a valid rule set.
pub(crate) fn load_rules(path: &Path) -> Result<(RulesFormat, RulesConfig), CliError> {
    let source = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let hint = extension_format(path);

    if source.is_empty() {
        tracing::debug!(path = %path.display(), "empty rule set");
        return Ok((hint.unwrap_or(RulesFormat::Json), RulesConfig::default()));
    }

    detect_and_validate(&source).map_err(|source_error| {
        if let Some(format) = hint
            && let Err(detail) = validate_as(&source, format)
        {
            tracing::warn!("{} is not a valid {} rule set: {}", path.display(), format, detail);
        }
        CliError::Rules {
            path: path.to_path_buf(),
            source: source_error,
        }
    })
}

/// Read one input file
pub(crate) fn read_input(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read all of stdin
pub(crate) fn read_stdin() -> Result<String, CliError> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

/// Print an error to stderr, in red when color is enabled
pub fn print_error(color: ColorChoice, error: &dyn fmt::Display) {
    let choice = match color {
        ColorChoice::Always => termcolor::ColorChoice::Always,
        ColorChoice::Never => termcolor::ColorChoice::Never,
        ColorChoice::Auto if io::stderr().is_terminal() => termcolor::ColorChoice::Auto,
        ColorChoice::Auto => termcolor::ColorChoice::Never,
    };

    let mut stderr = StandardStream::stderr(choice);
    // Nothing useful can be done if stderr itself fails.
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stderr, "Error:");
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {}", error);
}
