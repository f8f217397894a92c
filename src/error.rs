//! Error types for regex-rules
//!
//! This module defines the error types used throughout the engine, following
//! a hierarchical structure with one enum per concern and a top-level
//! `EngineError` that wraps them.

/// Rule-set validation errors
///
/// Every variant carries the complete, human-readable message so callers can
/// surface it without further formatting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// Neither the JSON nor the YAML validator accepted the source
    #[error("Invalid rules format. Must be JSON or YAML.")]
    InvalidFormat,

    /// The source is not syntactically valid JSON
    #[error("Invalid JSON format.")]
    InvalidJson,

    /// The source is not syntactically valid YAML
    #[error("Invalid YAML format.")]
    InvalidYaml,

    /// A required property is missing or has the wrong kind
    #[error("{0}")]
    Property(String),

    /// An object carries a key outside its allowed set
    #[error("{0}")]
    UnknownProperty(String),
}

/// Variable substitution errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VariableError {
    /// The variables map is missing
    #[error("The variables object is invalid.")]
    Invalid,
}

/// A rule's pattern could not be compiled
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "The regex of the action at position {position} in the group \"{group}\" is invalid: {message}"
)]
pub struct PatternError {
    /// Title of the group holding the action
    pub group: String,
    /// Zero-based index of the action inside its group
    pub position: usize,
    /// Pattern source after variable substitution
    pub pattern: String,
    /// Compiler diagnostic
    pub message: String,
}

/// A rule's pattern failed while matching
///
/// The backtracking matcher gives up on a pattern that exceeds its
/// backtrack limit instead of running forever.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "The regex of the action at position {position} in the group \"{group}\" failed to match: {message}"
)]
pub struct MatchError {
    pub group: String,
    pub position: usize,
    pub message: String,
}

/// Errors raised while applying a single action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// Matcher diagnostic
    #[error("{0}")]
    Match(String),
}

/// Top-level error type for the engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Rule-set validation error
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Variable substitution error
    #[error(transparent)]
    Variable(#[from] VariableError),

    /// Pattern compilation error
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// Pattern execution error
    #[error(transparent)]
    Match(#[from] MatchError),
}

/// A rule set could not be written out
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Raw JSON regex values end at the first double quote
    #[error(
        "The regex of the action at position {position} in the group \"{group}\" contains a double quote and cannot be written as JSON. Use YAML instead."
    )]
    QuotedRegex { group: String, position: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors raised while loading the CLI settings file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The settings file parsed but holds an unsupported value
    #[error("Invalid settings: {0}")]
    Validation(String),
}
