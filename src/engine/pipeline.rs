#![forbid(unsafe_code)]

//! Rule pipeline
//!
//! This module folds the ordered groups and actions of a rule set over a
//! text. Each active action receives the output of the previous one, so the
//! order of groups and actions is part of the result.
//!
//! Patterns are compiled once per rule set with [`CompiledRules::compile`]
//! and can then be applied to any number of texts. There is no timeout; a
//! pattern that exhausts the matcher's backtrack limit fails with
//! `EngineError::Match`.

use crate::engine::executor::apply_action;
use crate::engine::pattern::compile_pattern;
use crate::engine::variables::substitute_variables;
use crate::error::{ActionError, EngineError, MatchError, PatternError};
use crate::output::document::generate_document;
use crate::output::report::{BrokenRule, ValidationReport};
use crate::rules::{Action, RulesConfig, Variables, validate};
use crate::types::Mode;
use fancy_regex::Regex;

/// An active action with its pattern compiled
#[derive(Debug)]
struct CompiledAction {
    action: Action,
    position: usize,
    pattern: Regex,
}

#[derive(Debug)]
struct CompiledGroup {
    title: String,
    actions: Vec<CompiledAction>,
}

/// Active rules of a rule set, ready to apply
///
/// Inactive actions are dropped at compile time, so their patterns are never
/// compiled and never reported.
#[derive(Debug)]
pub struct CompiledRules {
    variables: Variables,
    groups: Vec<CompiledGroup>,
}

impl CompiledRules {
    /// Compiles the active actions of `config`
    ///
    /// Each regex has its variables resolved before compilation.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Pattern` for the first pattern that fails to
    /// compile.
    pub fn compile(config: &RulesConfig) -> Result<Self, EngineError> {
        let variables = config.variables_or_default();

        let mut groups = Vec::with_capacity(config.groups.len());
        for group in &config.groups {
            let mut actions = Vec::new();
            for (position, action) in group.active_actions() {
                let source = substitute_variables(&action.regex, Some(&variables))?;
                let pattern = compile_pattern(&source).map_err(|e| PatternError {
                    group: group.title.clone(),
                    position,
                    pattern: source.clone(),
                    message: e.to_string(),
                })?;
                actions.push(CompiledAction {
                    action: action.clone(),
                    position,
                    pattern,
                });
            }
            groups.push(CompiledGroup {
                title: group.title.clone(),
                actions,
            });
        }

        Ok(Self { variables, groups })
    }

    /// Returns the number of active actions
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.actions.len()).sum()
    }

    /// Returns true if no action is active
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies every active action in order and returns the final text
    ///
    /// Empty input is returned unchanged without applying anything.
    pub fn process(&self, text: &str) -> Result<String, EngineError> {
        if text.is_empty() {
            return Ok(String::new());
        }
        self.fold(text, |_, _, _| {})
    }

    /// Applies every active action in order and reports the ones that changed
    /// the text
    ///
    /// The transformed text is carried forward, so each rule is judged against
    /// the text as the previous rules left it.
    pub fn validate(&self, text: &str) -> Result<ValidationReport, EngineError> {
        let mut report = ValidationReport::new();
        self.fold(text, |group, compiled, changed| {
            if changed {
                report.push(BrokenRule {
                    group: group.title.clone(),
                    position: compiled.position,
                    description: compiled.action.description.clone(),
                });
            }
        })?;

        tracing::debug!(broken = report.broken_rules.len(), "validation finished");
        Ok(report)
    }

    fn fold<F>(&self, text: &str, mut observe: F) -> Result<String, EngineError>
    where
        F: FnMut(&CompiledGroup, &CompiledAction, bool),
    {
        let mut current = text.to_string();

        for group in &self.groups {
            for compiled in &group.actions {
                let next = apply_action(
                    &current,
                    &compiled.pattern,
                    &compiled.action,
                    Some(&self.variables),
                )
                .map_err(|e| match e {
                    ActionError::Variable(e) => EngineError::Variable(e),
                    ActionError::Match(message) => EngineError::Match(MatchError {
                        group: group.title.clone(),
                        position: compiled.position,
                        message,
                    }),
                })?;
                let changed = next != current;

                tracing::trace!(
                    group = %group.title,
                    position = compiled.position,
                    action = %compiled.action.action,
                    changed,
                    "applied action"
                );

                observe(group, compiled, changed);
                current = next;
            }
        }

        Ok(current)
    }
}

/// Runs one mode over an already validated rule set
///
/// `text` is ignored in `generate_document` mode, which also never compiles
/// patterns.
pub fn run_mode(config: &RulesConfig, text: &str, mode: Mode) -> Result<String, EngineError> {
    match mode {
        Mode::Process => CompiledRules::compile(config)?.process(text),
        Mode::Validate => Ok(CompiledRules::compile(config)?.validate(text)?.to_string()),
        Mode::GenerateDocument => Ok(generate_document(config)?),
    }
}

/// Applies a rule-set source to `text` in the given mode
///
/// The rule set is validated from source on every call, JSON first and YAML
/// second. An empty source behaves like a rule set with no groups and is
/// never validated; in `process` mode an empty text is returned unchanged
/// without validating the source either.
///
/// # Errors
///
/// Returns `EngineError::Schema` for an invalid rule set,
/// `EngineError::Pattern` for a pattern that does not compile,
/// `EngineError::Match` for a pattern the matcher gives up on and
/// `EngineError::Variable` from substitution.
pub fn apply_rules(text: &str, rules_source: &str, mode: Mode) -> Result<String, EngineError> {
    if rules_source.is_empty() {
        return run_mode(&RulesConfig::default(), text, mode);
    }

    if mode == Mode::Process && text.is_empty() {
        return Ok(String::new());
    }

    let config = validate(rules_source)?;
    run_mode(&config, text, mode)
}

/// Validates `text` against a rule-set source and returns the structured report
pub fn validate_rules(text: &str, rules_source: &str) -> Result<ValidationReport, EngineError> {
    if rules_source.is_empty() {
        return Ok(ValidationReport::new());
    }

    let config = validate(rules_source)?;
    CompiledRules::compile(&config)?.validate(text)
}
