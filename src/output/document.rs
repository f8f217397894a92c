#![forbid(unsafe_code)]

//! Markdown rendering of a rule set
//!
//! The document lists every group with at least one active action as a
//! level-2 heading and every active action as a level-3 heading built from
//! its description template:
//!
//! - `<regex/>` becomes the bold regex source
//! - `<action/>` becomes the bold action kind
//! - `<value/>` becomes the bold value with variables resolved
//! - `<summary/>` becomes a bullet list of action, regex and value

use crate::engine::substitute_variables;
use crate::error::VariableError;
use crate::rules::schema::ACTION_SCHEMA;
use crate::rules::{Action, RulesConfig, Variables};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// First line of every generated document
pub const DOCUMENT_TITLE: &str = "# Generated Document";

const SUMMARY_TOKEN: &str = "<summary/>";

/// Regex for description template tokens like <regex/>
static TEMPLATE_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(regex|action|value|summary)/>").expect("valid regex"));

/// Renders the Markdown description of every active rule
///
/// Inactive actions and groups without active actions are left out, so a
/// rule set with nothing active renders as the title alone.
///
/// # Errors
///
/// Propagates `VariableError` from value substitution.
pub fn generate_document(config: &RulesConfig) -> Result<String, VariableError> {
    let variables = config.variables_or_default();
    let mut document = String::from(DOCUMENT_TITLE);

    for group in config.groups.iter().filter(|g| g.has_active_actions()) {
        document.push_str("\n\n## ");
        document.push_str(&group.title);

        for (_, action) in group.active_actions() {
            document.push_str("\n\n### ");
            document.push_str(describe_action(action, Some(&variables))?.trim_end());
        }
    }

    Ok(document)
}

/// Fills the description template of an action
///
/// # Errors
///
/// Returns `VariableError::Invalid` when no variables map is supplied.
pub fn describe_action(
    action: &Action,
    variables: Option<&Variables>,
) -> Result<String, VariableError> {
    let value = substitute_variables(&action.value, variables)?;
    let summary = if action.description.contains(SUMMARY_TOKEN) {
        action_summary(action, variables)?
    } else {
        String::new()
    };

    Ok(TEMPLATE_TOKEN_REGEX
        .replace_all(&action.description, |caps: &Captures| match &caps[1] {
            "regex" => format!("**{}**", action.regex),
            "action" => format!("**{}**", action.action),
            "value" => format!("**{}**", value),
            _ => format!("\n{}", summary),
        })
        .into_owned())
}

/// Renders the bullet-list summary of an action, followed by a blank line
///
/// # Errors
///
/// Returns `VariableError::Invalid` when no variables map is supplied.
pub fn action_summary(
    action: &Action,
    variables: Option<&Variables>,
) -> Result<String, VariableError> {
    let mut summary = String::new();

    for (field, line) in ACTION_SCHEMA.summary_fields() {
        let raw = action.field_text(field.name).unwrap_or_default();
        let text = if line.substitute {
            substitute_variables(raw, variables)?
        } else {
            raw.to_string()
        };

        if line.code {
            summary.push_str(&format!("- **{}**: `{}`\n", line.label, text));
        } else {
            summary.push_str(&format!("- **{}**: {}\n", line.label, text));
        }
    }

    summary.push('\n');
    Ok(summary)
}
