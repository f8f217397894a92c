//! Lint command implementation
//!
//! Validates a rule-set file, compiles its active patterns and prints a short
//! summary.

use crate::cli::args::ColorChoice;
use crate::cli::common::{CliError, EXIT_SUCCESS, load_rules, print_error};
use crate::engine::CompiledRules;
use crate::rules::RulesConfig;
use crate::types::RulesFormat;
use std::path::Path;

/// Run the lint command
pub fn run_lint(rules: &Path, color: ColorChoice) -> i32 {
    match run_lint_inner(rules) {
        Ok(summary) => {
            print!("{}", summary);
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(color, &e);
            e.exit_code()
        }
    }
}

fn run_lint_inner(rules: &Path) -> Result<String, CliError> {
    let (format, config) = load_rules(rules)?;
    CompiledRules::compile(&config)?;
    Ok(format_summary(rules, format, &config))
}

/// Render the summary of a valid rule set
fn format_summary(path: &Path, format: RulesFormat, config: &RulesConfig) -> String {
    let (active, inactive) = config.action_counts();
    let variables = config.variables.as_ref().map_or(0, |v| v.len());

    let mut output = format!("{}: valid {} rule set\n", path.display(), format);
    output.push_str(&format!("  groups: {}\n", config.groups.len()));
    output.push_str(&format!(
        "  actions: {} active, {} inactive\n",
        active, inactive
    ));
    output.push_str(&format!("  variables: {}\n", variables));

    for group in &config.groups {
        let group_active = group.active_actions().count();
        output.push_str(&format!(
            "  - {} ({} active, {} inactive)\n",
            group.title,
            group_active,
            group.actions.len() - group_active
        ));
    }

    output
}
