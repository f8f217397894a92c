#![forbid(unsafe_code)]

//! Single-action execution
//!
//! Every pattern is applied with find-all semantics: `match` collects every
//! non-overlapping match, `replace` and `removeQuotes` rewrite every match.
//! There is no first-match-only mode.

use crate::engine::variables::substitute_variables;
use crate::error::ActionError;
use crate::rules::{Action, Variables};
use crate::types::ActionKind;
use fancy_regex::{Captures, Regex};
use std::sync::LazyLock;

/// Regex for capture-group references like {1}
static GROUP_REF_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\{(\d+)\}").expect("valid regex"));

/// Applies one action to `text`
///
/// The action value goes through variable substitution and then escape
/// processing before it is used as a join separator or replacement template.
///
/// # Errors
///
/// Returns `ActionError::Variable` when no variables map is supplied and
/// `ActionError::Match` when the matcher gives up on the pattern.
pub fn apply_action(
    text: &str,
    pattern: &Regex,
    action: &Action,
    variables: Option<&Variables>,
) -> Result<String, ActionError> {
    let value = process_escapes(&substitute_variables(&action.value, variables)?);

    let result = match action.action {
        ActionKind::Match => extract_matching_text(text, pattern, &value),
        ActionKind::Replace => replace_matching_text(text, pattern, &value),
        ActionKind::RemoveQuotes => remove_quotes(text, pattern),
    };

    result.map_err(|e| ActionError::Match(e.to_string()))
}

/// Converts the literal sequences `\n`, `\r` and `\t` to control characters
pub fn process_escapes(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

/// Keeps only the matched fragments, joined by `separator`
///
/// When the pattern has a capture group, the first group of each match is
/// kept instead of the whole match. No match leaves the text unchanged.
pub fn extract_matching_text(
    text: &str,
    pattern: &Regex,
    separator: &str,
) -> Result<String, fancy_regex::Error> {
    let has_group = pattern.captures_len() > 1;

    let mut fragments: Vec<&str> = Vec::new();
    for caps in pattern.captures_iter(text) {
        let caps = caps?;
        let fragment = if has_group { caps.get(1) } else { caps.get(0) };
        fragments.push(fragment.map_or("", |m| m.as_str()));
    }

    if fragments.is_empty() {
        return Ok(text.to_string());
    }

    Ok(fragments.join(separator))
}

/// Replaces every match with `template`, resolving `{N}` group references
///
/// `{N}` takes the text of the Nth capture group of that match; a group that
/// did not participate yields an empty string. References to groups the
/// pattern does not define, and `{0}`, are kept literally. Empty input yields
/// empty output.
pub fn replace_matching_text(
    text: &str,
    pattern: &Regex,
    template: &str,
) -> Result<String, fancy_regex::Error> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let group_count = pattern.captures_len();

    let replaced = pattern.try_replacen(text, 0, |caps: &Captures| {
        GROUP_REF_REGEX
            .replace_all(template, |reference: &regex::Captures| {
                match reference[1].parse::<usize>() {
                    Ok(index) if index >= 1 && index < group_count => caps
                        .get(index)
                        .map_or_else(String::new, |m| m.as_str().to_string()),
                    _ => reference[0].to_string(),
                }
            })
            .into_owned()
    })?;

    Ok(replaced.into_owned())
}

/// Strips double quotes inside every match, leaving the rest untouched
pub fn remove_quotes(text: &str, pattern: &Regex) -> Result<String, fancy_regex::Error> {
    let replaced = pattern.try_replacen(text, 0, |caps: &Captures| {
        caps.get(0).map_or_else(String::new, |m| m.as_str().replace('"', ""))
    })?;

    Ok(replaced.into_owned())
}
