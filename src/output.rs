//! Output renderers (Markdown document, validation report, JSONL)

pub mod document;
pub mod jsonl;
pub mod report;

pub use document::{DOCUMENT_TITLE, generate_document};
pub use jsonl::{JsonlFormatter, RunRecord};
pub use report::{BrokenRule, NO_RULES_TO_APPLY, ValidationReport};
