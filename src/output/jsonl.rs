#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in input order:
//! 1. For each input, one result record followed by its broken-rule records
//!    (validate mode only)
//! 2. One status record

use crate::output::report::ValidationReport;
use crate::types::Mode;
use serde::Serialize;

/// Outcome of running a rule set over one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    /// Input name ("-" for stdin)
    pub input: String,
    pub mode: Mode,
    /// Rendered output of the mode
    pub output: String,
    /// Structured report, present in validate mode
    pub report: Option<ValidationReport>,
}

impl RunRecord {
    /// Returns false if a validate-mode run found broken rules
    pub fn is_satisfied(&self) -> bool {
        self.report
            .as_ref()
            .is_none_or(ValidationReport::is_satisfied)
    }
}

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format run records as JSONL
    pub fn format(&self, records: &[RunRecord]) -> String {
        let mut output = String::new();

        for record in records {
            push_line(
                &mut output,
                &ResultRecord {
                    record_type: "result",
                    input: &record.input,
                    mode: record.mode,
                    output: &record.output,
                },
            );

            if let Some(report) = &record.report {
                for rule in &report.broken_rules {
                    push_line(
                        &mut output,
                        &BrokenRuleRecord {
                            record_type: "broken_rule",
                            input: &record.input,
                            group: &rule.group,
                            position: rule.position,
                            description: &rule.description,
                        },
                    );
                }
            }
        }

        push_line(
            &mut output,
            &StatusRecord {
                record_type: "status",
                inputs: records.len() as u64,
                satisfied: records.iter().all(RunRecord::is_satisfied),
            },
        );

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_line<T: Serialize>(output: &mut String, record: &T) {
    if let Ok(json) = serde_json::to_string(record) {
        output.push_str(&json);
        output.push('\n');
    }
}

#[derive(Debug, Serialize)]
struct ResultRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    input: &'a str,
    mode: Mode,
    output: &'a str,
}

#[derive(Debug, Serialize)]
struct BrokenRuleRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    input: &'a str,
    group: &'a str,
    position: usize,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    inputs: u64,
    satisfied: bool,
}
