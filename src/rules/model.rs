#![forbid(unsafe_code)]

//! Typed rule-set model
//!
//! Values of these types are only produced by the validator, so every field
//! has already been checked against the schema when a caller sees it.

use crate::error::SerializeError;
use crate::types::ActionKind;
use serde::Serialize;
use std::collections::BTreeMap;

/// Named placeholder values substituted for `<VAR=name>` tokens
pub type Variables = BTreeMap<String, String>;

/// One regex-driven transformation step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Free-form text, may embed `<regex/>`, `<action/>`, `<value/>` and `<summary/>`
    pub description: String,

    /// What to do with every match
    pub action: ActionKind,

    /// Pattern source, may contain `<VAR=name>` placeholders
    pub regex: String,

    /// Replacement or join template
    pub value: String,

    /// Inactive actions are skipped everywhere
    pub active: bool,
}

impl Action {
    /// Returns the source text of a string-valued field by schema name
    pub(crate) fn field_text(&self, name: &str) -> Option<&str> {
        match name {
            "description" => Some(&self.description),
            "action" => Some(self.action.as_str()),
            "regex" => Some(&self.regex),
            "value" => Some(&self.value),
            _ => None,
        }
    }
}

/// A titled, ordered collection of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleGroup {
    pub title: String,
    pub actions: Vec<Action>,
}

impl RuleGroup {
    /// Iterates over the active actions together with their source position
    pub fn active_actions(&self) -> impl Iterator<Item = (usize, &Action)> {
        self.actions
            .iter()
            .enumerate()
            .filter(|(_, action)| action.active)
    }

    /// Returns true if at least one action is active
    pub fn has_active_actions(&self) -> bool {
        self.actions.iter().any(|action| action.active)
    }
}

/// Root of a rule set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RulesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Variables>,

    pub groups: Vec<RuleGroup>,
}

impl RulesConfig {
    /// Returns the declared variables, or an empty map when none were declared
    pub fn variables_or_default(&self) -> Variables {
        self.variables.clone().unwrap_or_default()
    }

    /// Counts `(active, inactive)` actions across all groups
    pub fn action_counts(&self) -> (usize, usize) {
        self.groups
            .iter()
            .flat_map(|group| group.actions.iter())
            .fold((0, 0), |(active, inactive), action| {
                if action.active {
                    (active + 1, inactive)
                } else {
                    (active, inactive + 1)
                }
            })
    }

    /// Serializes the rule set as pretty JSON in authoring form
    ///
    /// Regex values are written raw, the way authors type them, so the output
    /// reads back through the JSON validator unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SerializeError::QuotedRegex` for the first regex holding a
    /// double quote, which the raw form cannot express.
    pub fn to_json_string(&self) -> Result<String, SerializeError> {
        for group in &self.groups {
            if let Some(position) = group.actions.iter().position(|a| a.regex.contains('"')) {
                return Err(SerializeError::QuotedRegex {
                    group: group.title.clone(),
                    position,
                });
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        Ok(super::format::unescape_regex_values(&json))
    }

    /// Serializes the rule set as YAML
    pub fn to_yaml_string(&self) -> Result<String, SerializeError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(active: bool) -> Action {
        Action {
            description: "d".to_string(),
            action: ActionKind::Replace,
            regex: "world".to_string(),
            value: "universe".to_string(),
            active,
        }
    }

    #[test]
    fn test_active_actions_keep_source_position() {
        let group = RuleGroup {
            title: "G".to_string(),
            actions: vec![action(false), action(true), action(false), action(true)],
        };

        let positions: Vec<usize> = group.active_actions().map(|(i, _)| i).collect();
        assert_eq!(positions, vec![1, 3]);
        assert!(group.has_active_actions());
    }

    #[test]
    fn test_action_counts() {
        let config = RulesConfig {
            variables: None,
            groups: vec![
                RuleGroup {
                    title: "A".to_string(),
                    actions: vec![action(true), action(false)],
                },
                RuleGroup {
                    title: "B".to_string(),
                    actions: vec![action(true)],
                },
            ],
        };
        assert_eq!(config.action_counts(), (2, 1));
    }

    #[test]
    fn test_serialization_omits_missing_variables() {
        let config = RulesConfig {
            variables: None,
            groups: vec![],
        };
        let json = config.to_json_string().unwrap();
        assert!(!json.contains("variables"));
        assert!(json.contains("\"groups\": []"));
    }

    #[test]
    fn test_json_keeps_regex_raw() {
        let config = RulesConfig {
            variables: None,
            groups: vec![RuleGroup {
                title: "G".to_string(),
                actions: vec![Action {
                    regex: r"\d+\s".to_string(),
                    ..action(true)
                }],
            }],
        };
        let json = config.to_json_string().unwrap();
        assert!(json.contains(r#""regex": "\d+\s""#));
    }

    #[test]
    fn test_yaml_serialization_uses_source_literals() {
        let config = RulesConfig {
            variables: Some(Variables::from([("name".to_string(), "x".to_string())])),
            groups: vec![RuleGroup {
                title: "G".to_string(),
                actions: vec![Action {
                    action: ActionKind::RemoveQuotes,
                    ..action(true)
                }],
            }],
        };
        let yaml = config.to_yaml_string().unwrap();
        assert!(yaml.contains("action: removeQuotes"));
        assert!(yaml.contains("name: x"));
    }

    #[test]
    fn test_json_rejects_quoted_regex() {
        let config = RulesConfig {
            variables: None,
            groups: vec![RuleGroup {
                title: "Quotes".to_string(),
                actions: vec![
                    action(true),
                    Action {
                        action: ActionKind::RemoveQuotes,
                        regex: r#""[a-z]+""#.to_string(),
                        ..action(false)
                    },
                ],
            }],
        };

        let err = config.to_json_string().unwrap_err();
        assert!(matches!(
            &err,
            SerializeError::QuotedRegex { group, position: 1 } if group == "Quotes"
        ));
        assert!(err.to_string().contains("Use YAML instead."));
        assert!(config.to_yaml_string().is_ok());
    }
}
