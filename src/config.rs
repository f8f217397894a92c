//! CLI settings file parsing and validation

pub mod settings;

pub use settings::{ColorOption, OutputConfig, OutputFormat, Settings, SettingsMeta};
