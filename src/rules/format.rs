#![forbid(unsafe_code)]

//! JSON and YAML adapters around the structural validator
//!
//! Each adapter only turns source text into a `serde_json::Value`; the
//! structural checks live in [`super::validator`]. Format detection tries
//! JSON first and YAML second and reports a single generic error when both
//! reject the source.

use crate::error::SchemaError;
use crate::rules::model::RulesConfig;
use crate::rules::validator::validate_value;
use crate::types::RulesFormat;
use regex::{Captures, Regex};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Matches `"regex": "<content>"` where content holds no double quote
static RAW_REGEX_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""regex":\s*"([^"]*)""#).expect("valid regex"));

/// Matches a serialized `"regex"` string value, escapes included
static SERIALIZED_REGEX_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""regex":\s*"((?:[^"\\]|\\.)*)""#).expect("valid regex")
});

/// Re-escapes the raw content of every `"regex"` value
///
/// Authors write regex metacharacters unescaped inside JSON strings, so
/// backslashes and double quotes in those values are escaped before the
/// text is handed to the JSON parser. Nothing outside `"regex"` values is
/// touched.
pub fn escape_regex_values(source: &str) -> Cow<'_, str> {
    RAW_REGEX_VALUE.replace_all(source, |caps: &Captures| {
        let escaped = caps[1].replace('\\', "\\\\").replace('"', "\\\"");
        format!("\"regex\": \"{}\"", escaped)
    })
}

/// Inverse of [`escape_regex_values`] for serializer output
///
/// Collapses every escaped backslash inside `"regex"` values so the value
/// reads as the author would type it.
pub(crate) fn unescape_regex_values(json: &str) -> String {
    SERIALIZED_REGEX_VALUE
        .replace_all(json, |caps: &Captures| {
            let mut raw = String::with_capacity(caps[1].len());
            let mut chars = caps[1].chars();
            while let Some(c) = chars.next() {
                raw.push(c);
                if c == '\\' {
                    match chars.next() {
                        Some('\\') | None => {}
                        Some(next) => raw.push(next),
                    }
                }
            }
            format!("\"regex\": \"{}\"", raw)
        })
        .into_owned()
}

/// Validates a JSON rule set
///
/// # Errors
///
/// Returns `SchemaError::InvalidJson` if the text does not parse, or the
/// structural error from the validator.
pub fn validate_json(source: &str) -> Result<RulesConfig, SchemaError> {
    let escaped = escape_regex_values(source);
    let value: Value = serde_json::from_str(&escaped).map_err(|e| {
        tracing::trace!(error = %e, "rule set is not JSON");
        SchemaError::InvalidJson
    })?;
    validate_value(&value, RulesFormat::Json)
}

/// Validates a YAML rule set
///
/// # Errors
///
/// Returns `SchemaError::InvalidYaml` if the text does not parse, or the
/// structural error from the validator.
pub fn validate_yaml(source: &str) -> Result<RulesConfig, SchemaError> {
    let value: Value = serde_yaml::from_str(source).map_err(|e| {
        tracing::trace!(error = %e, "rule set is not YAML");
        SchemaError::InvalidYaml
    })?;
    validate_value(&value, RulesFormat::Yaml)
}

/// Validates a rule set in the given format
pub fn validate_as(source: &str, format: RulesFormat) -> Result<RulesConfig, SchemaError> {
    match format {
        RulesFormat::Json => validate_json(source),
        RulesFormat::Yaml => validate_yaml(source),
    }
}

/// Detects the format of a rule set by trial validation
///
/// JSON is attempted first, then YAML. The inner errors are discarded.
///
/// # Errors
///
/// Returns `SchemaError::InvalidFormat` if neither attempt succeeds.
pub fn detect_and_validate(source: &str) -> Result<(RulesFormat, RulesConfig), SchemaError> {
    let attempts = [RulesFormat::Json, RulesFormat::Yaml];

    for format in attempts {
        match validate_as(source, format) {
            Ok(config) => {
                tracing::debug!(format = %format, groups = config.groups.len(), "rule set validated");
                return Ok((format, config));
            }
            Err(e) => {
                tracing::debug!(format = %format, error = %e, "rule set rejected");
            }
        }
    }

    Err(SchemaError::InvalidFormat)
}

/// Validates a rule set of unknown format
pub fn validate(source: &str) -> Result<RulesConfig, SchemaError> {
    detect_and_validate(source).map(|(_, config)| config)
}
