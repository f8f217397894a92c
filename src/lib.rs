#![forbid(unsafe_code)]

//! regex-rules: ordered regular-expression rule sets applied to text
//!
//! A rule set is written in JSON or YAML, validated against a fixed schema on
//! every call, and applied in one of three modes: transform the text, report
//! which rules would still change it, or render a Markdown description of the
//! active rules.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{
    ActionError, ConfigError, EngineError, MatchError, PatternError, SchemaError, SerializeError,
    VariableError,
};

// Re-export the main entry points
pub use engine::{CompiledRules, apply_rules, validate_rules};
pub use rules::{Action, RuleGroup, RulesConfig, Variables};
pub use types::{ActionKind, Mode, RulesFormat};
