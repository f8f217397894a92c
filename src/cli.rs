//! CLI argument parsing and command dispatch

pub mod args;
pub mod common;
pub mod convert;
pub mod lint;
pub mod run;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, Command, OutputFormat};
pub use run::RunArgs;
