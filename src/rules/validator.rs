#![forbid(unsafe_code)]

//! Structural validation of a parsed rule set
//!
//! Both format adapters hand an already-parsed `serde_json::Value` to
//! [`validate_value`] together with the format they parsed, so the JSON and
//! YAML entry points share one set of checks and differ only in the format
//! label embedded in messages. Checks fail fast: the first violation is
//! returned and nothing after it is examined.

use crate::error::SchemaError;
use crate::rules::model::{Action, RuleGroup, RulesConfig, Variables};
use crate::rules::schema::{
    ACTION_ACTIVE, ACTION_DESCRIPTION, ACTION_KIND, ACTION_REGEX, ACTION_SCHEMA, ACTION_VALUE,
    FieldSpec, GROUP_ACTIONS, GROUP_SCHEMA, GROUP_TITLE, ObjectSchema,
};
use crate::types::{ActionKind, RulesFormat};
use serde_json::{Map, Value};

/// Builds the positional message for a missing or mistyped property
///
/// The context name is always followed by a space, so an empty name yields a
/// double space before "must".
pub fn build_error_message(
    property: &str,
    index: Option<usize>,
    context: &str,
    context_name: &str,
    expected: &str,
) -> String {
    let position = match index {
        Some(index) => format!(" at position {}", index),
        None => String::new(),
    };
    format!(
        "The property {}{} in the {} {} must exist and be {}.",
        property, position, context, context_name, expected
    )
}

/// Validates a parsed rule set and converts it to the typed model
///
/// # Errors
///
/// Returns `SchemaError::Property` for a missing or mistyped property and
/// `SchemaError::UnknownProperty` for a key outside an object's allowed set.
pub fn validate_value(value: &Value, format: RulesFormat) -> Result<RulesConfig, SchemaError> {
    let root = value.as_object().ok_or_else(|| {
        SchemaError::Property(format!("The rules {} must be an object.", format.label()))
    })?;

    let variables = match root.get("variables") {
        Some(variables) => Some(validate_variables(variables)?),
        None => None,
    };

    let groups = root
        .get("groups")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            SchemaError::Property(build_error_message(
                "groups",
                None,
                format.label(),
                "",
                "array",
            ))
        })?;

    let groups = groups
        .iter()
        .enumerate()
        .map(|(index, group)| validate_group(group, index))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RulesConfig { variables, groups })
}

fn validate_variables(value: &Value) -> Result<Variables, SchemaError> {
    let object = value.as_object().ok_or_else(|| {
        SchemaError::Property("The \"variables\" property must be an object.".to_string())
    })?;

    // Numbers and booleans are substituted as their literal text
    object
        .iter()
        .map(|(name, value)| match value {
            Value::String(text) => Ok((name.clone(), text.clone())),
            Value::Number(number) => Ok((name.clone(), number.to_string())),
            Value::Bool(flag) => Ok((name.clone(), flag.to_string())),
            _ => Err(SchemaError::Property(format!(
                "The variable \"{}\" must be a string, number or boolean.",
                name
            ))),
        })
        .collect()
}

/// Validates one group at `index` of the `groups` array
pub fn validate_group(value: &Value, index: usize) -> Result<RuleGroup, SchemaError> {
    let object = value.as_object().ok_or_else(|| {
        SchemaError::Property(format!("The group at position {} must be an object.", index))
    })?;

    // The title is checked before it can be used as context.
    let title = object
        .get(GROUP_TITLE.name)
        .and_then(Value::as_str)
        .ok_or_else(|| field_error(&GROUP_SCHEMA, &GROUP_TITLE, index, ""))?;

    check_fields(object, &GROUP_SCHEMA, index, title)?;

    let actions = object
        .get(GROUP_ACTIONS.name)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(position, action)| validate_action(action, position, title))
        .collect::<Result<Vec<_>, _>>()?;

    check_allowed_keys(object, &GROUP_SCHEMA, &format!("The group \"{}\"", title))?;

    Ok(RuleGroup {
        title: title.to_string(),
        actions,
    })
}

/// Validates one action at `index` of the group titled `group_title`
pub fn validate_action(
    value: &Value,
    index: usize,
    group_title: &str,
) -> Result<Action, SchemaError> {
    let object = value.as_object().ok_or_else(|| {
        SchemaError::Property(format!(
            "The action at position {} in the group \"{}\" must be an object.",
            index, group_title
        ))
    })?;

    check_fields(object, &ACTION_SCHEMA, index, group_title)?;
    check_allowed_keys(
        object,
        &ACTION_SCHEMA,
        &format!(
            "The action at position {} in the group \"{}\"",
            index, group_title
        ),
    )?;

    let text = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let action = object
        .get(ACTION_KIND.name)
        .and_then(Value::as_str)
        .and_then(ActionKind::from_literal)
        .ok_or_else(|| field_error(&ACTION_SCHEMA, &ACTION_KIND, index, group_title))?;

    Ok(Action {
        description: text(ACTION_DESCRIPTION.name),
        action,
        regex: text(ACTION_REGEX.name),
        value: text(ACTION_VALUE.name),
        active: object
            .get(ACTION_ACTIVE.name)
            .and_then(Value::as_bool)
            .unwrap_or_default(),
    })
}

/// Checks every declared field of `schema` in declaration order
fn check_fields(
    object: &Map<String, Value>,
    schema: &ObjectSchema,
    index: usize,
    group_title: &str,
) -> Result<(), SchemaError> {
    for spec in schema.fields {
        let valid = object
            .get(spec.name)
            .is_some_and(|value| spec.kind.accepts(value));
        if !valid {
            return Err(field_error(schema, spec, index, group_title));
        }
    }
    Ok(())
}

/// Rejects the first key, in source order, that `schema` does not declare
fn check_allowed_keys(
    object: &Map<String, Value>,
    schema: &ObjectSchema,
    object_name: &str,
) -> Result<(), SchemaError> {
    match object.keys().find(|key| !schema.allows(key)) {
        Some(key) => Err(SchemaError::UnknownProperty(format!(
            "{} contains an unknown property: \"{}\".",
            object_name, key
        ))),
        None => Ok(()),
    }
}

fn field_error(
    schema: &ObjectSchema,
    spec: &FieldSpec,
    index: usize,
    group_title: &str,
) -> SchemaError {
    SchemaError::Property(build_error_message(
        &schema.property_path(spec),
        Some(index),
        "group",
        group_title,
        &spec.kind.expected(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_action() -> Value {
        json!({
            "description": "Replace world with universe",
            "action": "replace",
            "regex": "world",
            "value": "universe",
            "active": true
        })
    }

    fn with(mut value: Value, key: &str, replacement: Value) -> Value {
        value
            .as_object_mut()
            .unwrap()
            .insert(key.to_string(), replacement);
        value
    }

    fn message(result: Result<impl std::fmt::Debug, SchemaError>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_build_error_message_with_index() {
        assert_eq!(
            build_error_message("propertyName", Some(0), "context", "contextName", "type"),
            "The property propertyName at position 0 in the context contextName must exist and be type."
        );
    }

    #[test]
    fn test_build_error_message_without_index() {
        assert_eq!(
            build_error_message("propertyName", None, "context", "contextName", "type"),
            "The property propertyName in the context contextName must exist and be type."
        );
    }

    #[test]
    fn test_valid_action() {
        let action = validate_action(&valid_action(), 0, "Test Group").unwrap();
        assert_eq!(action.action, ActionKind::Replace);
        assert_eq!(action.regex, "world");
        assert!(action.active);
    }

    #[test]
    fn test_action_not_an_object() {
        assert_eq!(
            message(validate_action(&Value::Null, 3, "Test Group")),
            "The action at position 3 in the group \"Test Group\" must be an object."
        );
    }

    #[test]
    fn test_action_field_errors() {
        let cases = [
            ("description", json!(123), "action.description", "string"),
            (
                "action",
                json!("invalid"),
                "action.action",
                r#""match", "replace" or "removeQuotes""#,
            ),
            ("regex", json!(123), "action.regex", "string"),
            ("value", json!(123), "action.value", "string"),
            ("active", json!("invalid"), "action.active", "boolean"),
        ];

        for (key, bad, property, expected) in cases {
            let action = with(valid_action(), key, bad);
            assert_eq!(
                message(validate_action(&action, 0, "Test Group")),
                format!(
                    "The property {} at position 0 in the group Test Group must exist and be {}.",
                    property, expected
                ),
                "field {}",
                key
            );
        }
    }

    #[test]
    fn test_action_missing_field() {
        let mut action = valid_action();
        action.as_object_mut().unwrap().remove("active");
        assert_eq!(
            message(validate_action(&action, 1, "G")),
            "The property action.active at position 1 in the group G must exist and be boolean."
        );
    }

    #[test]
    fn test_action_unknown_property() {
        let action = with(valid_action(), "unknown", json!("unknown"));
        let err = validate_action(&action, 0, "Test Group").unwrap_err();
        assert!(matches!(err, SchemaError::UnknownProperty(_)));
        assert_eq!(
            err.to_string(),
            "The action at position 0 in the group \"Test Group\" contains an unknown property: \"unknown\"."
        );
    }

    #[test]
    fn test_field_errors_win_over_unknown_keys() {
        let action = with(valid_action(), "extra", json!(1));
        let action = with(action, "regex", json!(null));
        assert!(matches!(
            validate_action(&action, 0, "G").unwrap_err(),
            SchemaError::Property(_)
        ));
    }

    #[test]
    fn test_group_errors() {
        let group = json!({ "title": 123, "actions": [] });
        assert_eq!(
            message(validate_group(&group, 0)),
            "The property group.title at position 0 in the group  must exist and be string."
        );

        let group = json!({ "title": "Test Group", "actions": "invalid" });
        assert_eq!(
            message(validate_group(&group, 0)),
            "The property group.actions at position 0 in the group Test Group must exist and be array."
        );

        let group = json!({ "title": "Test Group", "actions": [], "unknown": "unknown" });
        assert_eq!(
            message(validate_group(&group, 0)),
            "The group \"Test Group\" contains an unknown property: \"unknown\"."
        );
    }

    #[test]
    fn test_action_errors_come_before_group_unknown_keys() {
        let group = json!({
            "title": "G",
            "actions": [with(valid_action(), "bogus", json!(true))],
            "extra": 1
        });
        assert_eq!(
            message(validate_group(&group, 0)),
            "The action at position 0 in the group \"G\" contains an unknown property: \"bogus\"."
        );
    }

    #[test]
    fn test_root_errors() {
        assert_eq!(
            message(validate_value(&json!([]), RulesFormat::Json)),
            "The rules JSON must be an object."
        );
        assert_eq!(
            message(validate_value(&json!({ "groups": "invalid" }), RulesFormat::Json)),
            "The property groups in the JSON  must exist and be array."
        );
        assert_eq!(
            message(validate_value(&json!({}), RulesFormat::Yaml)),
            "The property groups in the YAML  must exist and be array."
        );
    }

    #[test]
    fn test_variables_errors() {
        let expected = "The \"variables\" property must be an object.";
        for bad in [json!("invalid"), json!([]), Value::Null, json!(1)] {
            let root = json!({ "variables": bad, "groups": [] });
            assert_eq!(message(validate_value(&root, RulesFormat::Json)), expected);
        }

        for bad in [Value::Null, json!([1]), json!({ "a": 1 })] {
            let root = json!({ "variables": { "n": bad }, "groups": [] });
            assert_eq!(
                message(validate_value(&root, RulesFormat::Json)),
                "The variable \"n\" must be a string, number or boolean."
            );
        }
    }

    #[test]
    fn test_scalar_variables_coerced() {
        let root = json!({ "variables": { "year": 2024, "debug": false, "name": "x" }, "groups": [] });
        let variables = validate_value(&root, RulesFormat::Json).unwrap().variables.unwrap();
        assert_eq!(variables["year"], "2024");
        assert_eq!(variables["debug"], "false");
        assert_eq!(variables["name"], "x");
    }

    #[test]
    fn test_unknown_keys_in_source_order() {
        let root = json!({ "groups": [{ "title": "G", "actions": [], "zzz": 1, "aaa": 2 }] });
        assert_eq!(
            message(validate_value(&root, RulesFormat::Json)),
            "The group \"G\" contains an unknown property: \"zzz\"."
        );
    }

    #[test]
    fn test_variables_checked_before_groups() {
        let root = json!({ "variables": "invalid", "groups": "invalid" });
        assert_eq!(
            message(validate_value(&root, RulesFormat::Json)),
            "The \"variables\" property must be an object."
        );
    }

    #[test]
    fn test_valid_config_preserves_order() {
        let root = json!({
            "variables": { "planet": "earth" },
            "groups": [
                { "title": "First", "actions": [valid_action(), with(valid_action(), "regex", json!("b"))] },
                { "title": "Second", "actions": [] }
            ]
        });
        let config = validate_value(&root, RulesFormat::Json).unwrap();
        assert_eq!(config.groups.len(), 2);
        assert_eq!(config.groups[0].title, "First");
        assert_eq!(config.groups[0].actions[1].regex, "b");
        assert!(config.groups[1].actions.is_empty());
        assert_eq!(
            config.variables.unwrap().get("planet").map(String::as_str),
            Some("earth")
        );
    }

    #[test]
    fn test_missing_variables_stay_none() {
        let config = validate_value(&json!({ "groups": [] }), RulesFormat::Yaml).unwrap();
        assert!(config.variables.is_none());
        assert!(config.groups.is_empty());
    }
}
