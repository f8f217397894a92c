//! Run command implementation
//!
//! This module implements the `regex-rules run` command, which:
//! - Resolves the rule set, mode and output format (flags over settings)
//! - Loads and validates the rule set once
//! - Applies it to every input in parallel, or to stdin
//! - Prints the results in input order (text or JSONL)
//! - Returns the exit code

use crate::cli::args::{ColorChoice, OutputFormat};
use crate::cli::common::{
    CliError, EXIT_BROKEN, EXIT_SUCCESS, STDIN_NAME, load_rules, print_error, read_input,
    read_stdin,
};
use crate::config::Settings;
use crate::engine::CompiledRules;
use crate::error::EngineError;
use crate::output::{JsonlFormatter, RunRecord, generate_document};
use crate::types::Mode;
use rayon::prelude::*;
use std::path::PathBuf;

/// Arguments of the run command after parsing
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    pub inputs: Vec<PathBuf>,
    pub rules: Option<PathBuf>,
    pub mode: Option<Mode>,
    pub format: Option<OutputFormat>,
}

/// Run the run command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 1: Validate mode found rules that still change an input
/// - 2: Error (settings, I/O, variables)
/// - 3: Invalid rule set or pattern
pub fn run_run(args: &RunArgs, settings: &Settings, color: ColorChoice) -> i32 {
    match run_run_inner(args, settings) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_BROKEN,
        Err(e) => {
            print_error(color, &e);
            e.exit_code()
        }
    }
}

fn run_run_inner(args: &RunArgs, settings: &Settings) -> Result<bool, CliError> {
    let rules_path = args
        .rules
        .clone()
        .or_else(|| settings.settings.rules.clone())
        .ok_or(CliError::MissingRules)?;
    let mode = args.mode.unwrap_or(settings.settings.mode);
    let format = args
        .format
        .unwrap_or_else(|| settings.output.format.into());

    let (_, config) = load_rules(&rules_path)?;

    let records = if mode == Mode::GenerateDocument {
        // The document depends only on the rule set, so inputs are not read.
        let document = generate_document(&config).map_err(EngineError::from)?;
        vec![RunRecord {
            input: rules_path.display().to_string(),
            mode,
            output: document,
            report: None,
        }]
    } else {
        let compiled = CompiledRules::compile(&config)?;
        tracing::debug!(actions = compiled.len(), inputs = args.inputs.len(), "running rules");

        if args.inputs.is_empty() {
            let text = read_stdin()?;
            vec![apply(&compiled, STDIN_NAME.to_string(), &text, mode)?]
        } else {
            args.inputs
                .par_iter()
                .map(|path| {
                    let text = read_input(path)?;
                    apply(&compiled, path.display().to_string(), &text, mode)
                })
                .collect::<Result<Vec<_>, CliError>>()?
        }
    };

    match format {
        OutputFormat::Text => print_text(&records),
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format(&records)),
    }

    Ok(records.iter().all(RunRecord::is_satisfied))
}

/// Apply the compiled rules to one input
fn apply(
    compiled: &CompiledRules,
    input: String,
    text: &str,
    mode: Mode,
) -> Result<RunRecord, CliError> {
    let (output, report) = match mode {
        Mode::Validate => {
            let report = compiled.validate(text)?;
            (report.to_string(), Some(report))
        }
        _ => (compiled.process(text)?, None),
    };

    Ok(RunRecord {
        input,
        mode,
        output,
        report,
    })
}

/// Print outputs as text, with a header per input when there are several
fn print_text(records: &[RunRecord]) {
    let headers = records.len() > 1;

    for (i, record) in records.iter().enumerate() {
        if headers {
            if i > 0 {
                println!();
            }
            println!("==> {} <==", record.input);
        }

        print!("{}", record.output);
        if !record.output.is_empty() && !record.output.ends_with('\n') {
            println!();
        }
    }
}
