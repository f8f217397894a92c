#![forbid(unsafe_code)]

//! Declarative description of the rule-set objects
//!
//! The validator walks these tables to check untrusted input, and the
//! document renderer walks the same tables to build action summaries, so the
//! accepted shape and the rendered shape come from one place.

use crate::types::ActionKind;
use serde_json::Value;

/// The kind of value a field must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Array,
    /// One of the `ActionKind` literals
    ActionKind,
}

impl FieldKind {
    /// Returns true if `value` has this kind
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Array => value.is_array(),
            FieldKind::ActionKind => value
                .as_str()
                .and_then(ActionKind::from_literal)
                .is_some(),
        }
    }

    /// Describes the expected kind the way validation messages phrase it
    pub fn expected(&self) -> String {
        match self {
            FieldKind::String => "string".to_string(),
            FieldKind::Boolean => "boolean".to_string(),
            FieldKind::Array => "array".to_string(),
            FieldKind::ActionKind => {
                let literals: Vec<String> = ActionKind::ALL
                    .iter()
                    .map(|kind| format!("\"{}\"", kind.as_str()))
                    .collect();
                match literals.split_last() {
                    Some((last, rest)) if !rest.is_empty() => {
                        format!("{} or {}", rest.join(", "), last)
                    }
                    _ => literals.join(""),
                }
            }
        }
    }
}

/// How a field appears in a rendered action summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLine {
    /// Bold label at the start of the bullet
    pub label: &'static str,
    /// Render the value as inline code
    pub code: bool,
    /// Resolve `<VAR=name>` placeholders before rendering
    pub substitute: bool,
}

/// One required field of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub summary: Option<SummaryLine>,
}

/// The complete shape of one object kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Prefix used in property paths (`action.regex`, `group.title`)
    pub name: &'static str,
    /// Required fields, in the order they are checked
    pub fields: &'static [FieldSpec],
}

impl ObjectSchema {
    /// Returns true if `key` is one of the declared fields
    pub fn allows(&self, key: &str) -> bool {
        self.fields.iter().any(|field| field.name == key)
    }

    /// Returns the dotted property path of a field (`action.regex`)
    pub fn property_path(&self, field: &FieldSpec) -> String {
        format!("{}.{}", self.name, field.name)
    }

    /// Iterates over the fields that appear in summaries, in summary order
    pub fn summary_fields(&self) -> impl Iterator<Item = (&FieldSpec, &SummaryLine)> {
        self.fields
            .iter()
            .filter_map(|field| field.summary.as_ref().map(|line| (field, line)))
    }
}

pub const ACTION_DESCRIPTION: FieldSpec = FieldSpec {
    name: "description",
    kind: FieldKind::String,
    summary: None,
};

pub const ACTION_KIND: FieldSpec = FieldSpec {
    name: "action",
    kind: FieldKind::ActionKind,
    summary: Some(SummaryLine {
        label: "Action",
        code: false,
        substitute: false,
    }),
};

pub const ACTION_REGEX: FieldSpec = FieldSpec {
    name: "regex",
    kind: FieldKind::String,
    summary: Some(SummaryLine {
        label: "Regex",
        code: true,
        substitute: false,
    }),
};

pub const ACTION_VALUE: FieldSpec = FieldSpec {
    name: "value",
    kind: FieldKind::String,
    summary: Some(SummaryLine {
        label: "Value",
        code: false,
        substitute: true,
    }),
};

pub const ACTION_ACTIVE: FieldSpec = FieldSpec {
    name: "active",
    kind: FieldKind::Boolean,
    summary: None,
};

pub const ACTION_SCHEMA: ObjectSchema = ObjectSchema {
    name: "action",
    fields: &[
        ACTION_DESCRIPTION,
        ACTION_KIND,
        ACTION_REGEX,
        ACTION_VALUE,
        ACTION_ACTIVE,
    ],
};

pub const GROUP_TITLE: FieldSpec = FieldSpec {
    name: "title",
    kind: FieldKind::String,
    summary: None,
};

pub const GROUP_ACTIONS: FieldSpec = FieldSpec {
    name: "actions",
    kind: FieldKind::Array,
    summary: None,
};

pub const GROUP_SCHEMA: ObjectSchema = ObjectSchema {
    name: "group",
    fields: &[GROUP_TITLE, GROUP_ACTIONS],
};
