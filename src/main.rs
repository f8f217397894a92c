//! regex-rules CLI entry point

use clap::Parser;
use regex_rules::cli::common::{load_settings, print_error, resolve_color};
use regex_rules::cli::{Command, RunArgs, args::Cli};
use std::process;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let settings = match load_settings(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            let exit_code = e.exit_code();
            print_error(resolve_color(cli.color, None), &e);
            process::exit(exit_code);
        }
    };
    let color = resolve_color(cli.color, Some(&settings));

    let exit_code = match cli.command {
        Command::Run {
            inputs,
            rules,
            mode,
            format,
        } => {
            let args = RunArgs {
                inputs,
                rules,
                mode,
                format,
            };
            regex_rules::cli::run::run_run(&args, &settings, color)
        }
        Command::Lint { rules } => regex_rules::cli::lint::run_lint(&rules, color),
        Command::Convert { rules, to } => {
            regex_rules::cli::convert::run_convert(&rules, to, color)
        }
    };

    process::exit(exit_code);
}
