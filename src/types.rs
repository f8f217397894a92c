#![forbid(unsafe_code)]

//! Core domain types for regex-rules
//!
//! This module defines the small enums shared by the schema, the engine and
//! the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of transformation an action performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    /// Keep only the matched fragments, joined by the action value
    Match,
    /// Replace every match with the action value
    Replace,
    /// Strip double quotes inside every match
    RemoveQuotes,
}

impl ActionKind {
    /// All kinds, in the order they are listed in error messages
    pub const ALL: [ActionKind; 3] = [ActionKind::Match, ActionKind::Replace, ActionKind::RemoveQuotes];

    /// Returns the literal used in rule-set sources
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Match => "match",
            ActionKind::Replace => "replace",
            ActionKind::RemoveQuotes => "removeQuotes",
        }
    }

    /// Parses a rule-set literal, returning None for anything else
    pub fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == literal)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which output a pipeline invocation produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Transformed text
    #[default]
    Process,
    /// List of rules that still change the text
    Validate,
    /// Markdown description of the active rules
    GenerateDocument,
}

impl Mode {
    /// Returns the literal name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Process => "process",
            Mode::Validate => "validate",
            Mode::GenerateDocument => "generate_document",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process" => Ok(Mode::Process),
            "validate" => Ok(Mode::Validate),
            "generate_document" => Ok(Mode::GenerateDocument),
            other => Err(format!(
                "Invalid mode '{}'. Expected process, validate or generate_document",
                other
            )),
        }
    }
}

/// Serialization format of a rule-set source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulesFormat {
    Json,
    Yaml,
}

impl RulesFormat {
    /// Returns the label embedded in validation messages ("JSON" / "YAML")
    pub fn label(&self) -> &'static str {
        match self {
            RulesFormat::Json => "JSON",
            RulesFormat::Yaml => "YAML",
        }
    }

    /// Maps a file extension to a format hint
    ///
    /// Returns None for anything other than `json`, `yaml` and `yml`.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(RulesFormat::Json),
            "yaml" | "yml" => Some(RulesFormat::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for RulesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RulesFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RulesFormat::from_extension(s)
            .ok_or_else(|| format!("Invalid format '{}'. Expected json or yaml", s))
    }
}
