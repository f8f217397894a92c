#![forbid(unsafe_code)]

//! Rule-set model, schema and validation

pub mod format;
mod model;
pub mod schema;
pub mod validator;

// Re-export core types
pub use format::{
    detect_and_validate, escape_regex_values, validate, validate_as, validate_json, validate_yaml,
};
pub use model::{Action, RuleGroup, RulesConfig, Variables};
