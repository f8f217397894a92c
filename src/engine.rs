//! Rule execution: variable substitution, single actions and the pipeline

pub mod executor;
pub mod pattern;
pub mod pipeline;
pub mod variables;

pub use executor::{apply_action, process_escapes};
pub use pattern::compile_pattern;
pub use pipeline::{CompiledRules, apply_rules, run_mode, validate_rules};
pub use variables::substitute_variables;
