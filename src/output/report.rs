#![forbid(unsafe_code)]

//! Validate-mode report

use serde::Serialize;
use std::fmt;

/// Text of a report with no broken rules
pub const NO_RULES_TO_APPLY: &str = "No rules to apply.";

/// A rule that still changes the text it was validated against
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenRule {
    /// Title of the group holding the action
    pub group: String,

    /// Position of the action inside its group
    pub position: usize,

    /// Action description, verbatim
    pub description: String,
}

/// Broken rules in the order they were discovered
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationReport {
    pub broken_rules: Vec<BrokenRule>,
}

impl ValidationReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a broken rule
    pub fn push(&mut self, rule: BrokenRule) {
        self.broken_rules.push(rule);
    }

    /// Returns true if every rule is already satisfied
    pub fn is_satisfied(&self) -> bool {
        self.broken_rules.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    /// One `Rule "<description>" needs to be applied.` line per broken rule,
    /// or `No rules to apply.` when there are none
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_satisfied() {
            return f.write_str(NO_RULES_TO_APPLY);
        }

        for (i, rule) in self.broken_rules.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "Rule \"{}\" needs to be applied.", rule.description)?;
        }
        Ok(())
    }
}
