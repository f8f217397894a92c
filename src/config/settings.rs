//! Parsing and validation for regex-rules.toml settings files

use crate::error::ConfigError;
use crate::types::Mode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default settings file name, looked up in the current directory
pub const SETTINGS_FILE: &str = "regex-rules.toml";

/// Main configuration struct for regex-rules.toml
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Defaults for the run command
    #[serde(default)]
    pub settings: SettingsMeta,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Settings {
    /// Load settings from a TOML file
    ///
    /// A relative `settings.rules` path is resolved against the directory
    /// holding the settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut settings = Self::parse(&content)?;

        if let Some(rules) = settings.settings.rules.as_mut()
            && rules.is_relative()
            && let Some(dir) = path.parent()
        {
            *rules = dir.join(&*rules);
        }

        Ok(settings)
    }

    /// Parse settings from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load the explicit settings file, or the default one if it exists
    ///
    /// An explicit path must exist. Without one, a missing default file
    /// yields built-in defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = Path::new(SETTINGS_FILE);
        if default_path.exists() {
            tracing::debug!(path = %default_path.display(), "loading settings");
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the settings
    fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported settings version '{}'. Expected '1'",
                self.settings.version
            )));
        }

        if let Some(rules) = &self.settings.rules
            && rules.as_os_str().is_empty()
        {
            return Err(ConfigError::Validation(
                "settings.rules must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Defaults section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsMeta {
    /// Settings version (must be "1")
    #[serde(default = "default_version")]
    pub version: String,

    /// Rule-set file used when --rules is not given, relative to the
    /// settings file
    #[serde(default)]
    pub rules: Option<PathBuf>,

    /// Mode used when --mode is not given
    #[serde(default)]
    pub mode: Mode,
}

impl Default for SettingsMeta {
    fn default() -> Self {
        Self {
            version: default_version(),
            rules: None,
            mode: Mode::default(),
        }
    }
}

fn default_version() -> String {
    "1".to_string()
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text
    #[default]
    Text,
    /// JSON Lines format
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_SETTINGS: &str = r#"
[settings]
version = "1"
rules = "rules/cleanup.yaml"
mode = "validate"

[output]
format = "jsonl"
color = "never"
"#;

    #[test]
    fn test_parse_full_settings() {
        let settings = Settings::parse(FULL_SETTINGS).unwrap();
        assert_eq!(settings.settings.version, "1");
        assert_eq!(
            settings.settings.rules.as_deref(),
            Some(Path::new("rules/cleanup.yaml"))
        );
        assert_eq!(settings.settings.mode, Mode::Validate);
        assert_eq!(settings.output.format, OutputFormat::Jsonl);
        assert_eq!(settings.output.color, ColorOption::Never);
    }

    #[test]
    fn test_parse_empty_settings_uses_defaults() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.settings.mode, Mode::Process);
        assert!(settings.settings.rules.is_none());
        assert_eq!(settings.output.format, OutputFormat::Text);
        assert_eq!(settings.output.color, ColorOption::Auto);
    }

    #[test]
    fn test_generate_document_mode_name() {
        let settings = Settings::parse("[settings]\nmode = \"generate_document\"\n").unwrap();
        assert_eq!(settings.settings.mode, Mode::GenerateDocument);
    }

    #[test]
    fn test_invalid_version() {
        let result = Settings::parse("[settings]\nversion = \"2\"\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Unsupported settings version '2'")
        );
    }

    #[test]
    fn test_empty_rules_path() {
        let result = Settings::parse("[settings]\nrules = \"\"\n");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result = Settings::parse("[settings]\ntimeout = 5\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = Settings::parse("[extra]\nkey = 1\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_mode() {
        let result = Settings::parse("[settings]\nmode = \"transform\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, FULL_SETTINGS).unwrap();

        let settings = Settings::discover(Some(&path)).unwrap();
        assert_eq!(settings.settings.mode, Mode::Validate);
        assert_eq!(
            settings.settings.rules,
            Some(dir.path().join("rules/cleanup.yaml"))
        );
    }

    #[test]
    fn test_rules_path_relative_to_settings_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("config");
        fs::create_dir(&nested).unwrap();

        let path = nested.join("custom.toml");
        fs::write(&path, "[settings]\nrules = \"r.json\"\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.settings.rules, Some(nested.join("r.json")));

        let absolute = dir.path().join("elsewhere.json");
        fs::write(
            &path,
            format!("[settings]\nrules = {:?}\n", absolute.display().to_string()),
        )
        .unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.settings.rules, Some(absolute));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = Settings::discover(Some(&dir.path().join("missing.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
