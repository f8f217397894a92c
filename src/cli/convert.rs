//! Convert command implementation

use crate::cli::args::ColorChoice;
use crate::cli::common::{CliError, EXIT_SUCCESS, extension_format, load_rules, print_error};
use crate::types::RulesFormat;
use std::path::Path;

/// Run the convert command
///
/// Without `to`, a file whose content does not match its extension is
/// written in the extension's format; otherwise the rule set is written in
/// the format it was not read in.
pub fn run_convert(rules: &Path, to: Option<RulesFormat>, color: ColorChoice) -> i32 {
    match run_convert_inner(rules, to) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            EXIT_SUCCESS
        }
        Err(e) => {
            print_error(color, &e);
            e.exit_code()
        }
    }
}

fn run_convert_inner(rules: &Path, to: Option<RulesFormat>) -> Result<String, CliError> {
    let (from, config) = load_rules(rules)?;
    let target = to.unwrap_or(match (from, extension_format(rules)) {
        (from, Some(named)) if named != from => named,
        (RulesFormat::Json, _) => RulesFormat::Yaml,
        (RulesFormat::Yaml, _) => RulesFormat::Json,
    });
    tracing::debug!(from = %from, to = %target, "converting rule set");

    let output = match target {
        RulesFormat::Json => config.to_json_string()?,
        RulesFormat::Yaml => config.to_yaml_string()?,
    };
    Ok(output)
}
