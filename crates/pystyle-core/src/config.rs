//! Configuration types for pystyle.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for pystyle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    pub preset: Option<String>,

    /// Severity threshold for test failure (default: "error").
    /// Violations at or above this severity cause `check!()` to fail.
    pub fail_on: Option<String>,

    /// Expected indentation unit width in columns.
    pub indent_width: usize,

    /// Maximum physical line length in characters.
    pub max_line_length: usize,

    /// Maximum length for comment-only lines.
    pub max_comment_length: usize,

    /// Blank lines required before a top-level definition.
    pub blank_lines_top_level: usize,

    /// Blank lines required before a method.
    pub blank_lines_method: usize,

    /// Required suffix for exception class names.
    pub exception_suffix: String,

    /// Root module names of the project itself, for import classification.
    pub local_package_prefixes: Vec<String>,

    /// Standard-library module names; empty selects the embedded list.
    pub standard_library_modules: Vec<String>,

    /// Whether line-length applies to lines inside multi-line strings.
    pub measure_inside_multiline_strings: bool,

    /// File discovery configuration.
    pub files: FilesConfig,

    /// Per-rule configurations.
    pub rules: HashMap<String, RuleConfig>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            preset: None,
            fail_on: None,
            indent_width: 4,
            max_line_length: 79,
            max_comment_length: 72,
            blank_lines_top_level: 2,
            blank_lines_method: 1,
            exception_suffix: "Error".to_string(),
            local_package_prefixes: Vec::new(),
            standard_library_modules: Vec::new(),
            measure_inside_multiline_strings: false,
            files: FilesConfig::default(),
            rules: HashMap::new(),
        }
    }
}

impl LintConfig {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration table for a rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// The effective `fail_on` severity.
    #[must_use]
    pub fn fail_on_severity(&self) -> Severity {
        self.fail_on
            .as_deref()
            .and_then(Severity::parse)
            .unwrap_or(Severity::Error)
    }

    /// Validates thresholds and rule references.
    ///
    /// `known_rules` maps available rule names to their codes; an override
    /// naming neither is a configuration error. Configuration errors block
    /// the run entirely, unlike code diagnostics.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self, known_rules: &[(&str, &str)]) -> Result<(), ConfigError> {
        for (field, value) in [
            ("indent_width", self.indent_width),
            ("max_line_length", self.max_line_length),
            ("max_comment_length", self.max_comment_length),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidThreshold {
                    field: field.to_string(),
                });
            }
        }
        if let Some(name) = &self.fail_on {
            if Severity::parse(name).is_none() {
                return Err(ConfigError::InvalidSeverity {
                    value: name.clone(),
                });
            }
        }
        for rule_id in self.rules.keys() {
            if !known_rules
                .iter()
                .any(|(name, code)| rule_id == name || rule_id == code)
            {
                return Err(ConfigError::UnknownRule {
                    rule: rule_id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// File discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Root directory to lint (default: current directory).
    pub root: PathBuf,

    /// Glob patterns to exclude from linting.
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, all *.py files).
    pub include: Vec<String>,

    /// Whether to respect .gitignore files.
    pub respect_gitignore: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude: vec![
                "**/.venv/**".to_string(),
                "**/__pycache__/**".to_string(),
                "**/build/**".to_string(),
            ],
            include: Vec::new(),
            respect_gitignore: true,
        }
    }
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors. These block the run entirely, unlike code
/// diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A threshold that must be positive is zero.
    #[error("Configuration field `{field}` must be positive")]
    InvalidThreshold {
        /// Field name.
        field: String,
    },

    /// A rule override names a rule that does not exist.
    #[error("Unknown rule `{rule}` in configuration")]
    UnknownRule {
        /// The unmatched rule id.
        rule: String,
    },

    /// An invalid severity name.
    #[error("Invalid severity `{value}` (expected error, warning, or info)")]
    InvalidSeverity {
        /// The unmatched severity name.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = LintConfig::default();
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.max_line_length, 79);
        assert_eq!(config.max_comment_length, 72);
        assert_eq!(config.blank_lines_top_level, 2);
        assert_eq!(config.blank_lines_method, 1);
        assert_eq!(config.exception_suffix, "Error");
        assert!(!config.measure_inside_multiline_strings);
        assert!(config.files.respect_gitignore);
        assert!(config.rules.is_empty());
    }

    #[test]
    fn parse_config_with_rule_table() {
        let toml = r#"
max_line_length = 100
local_package_prefixes = ["myproject"]

[files]
root = "./src"
exclude = ["**/generated/**"]

[rules.line-length]
enabled = true
severity = "info"

[rules.missing-docstring]
require_nested = true
"#;

        let config = LintConfig::parse(toml).expect("Failed to parse");
        assert_eq!(config.max_line_length, 100);
        assert_eq!(config.files.root, PathBuf::from("./src"));
        assert!(config.is_rule_enabled("line-length"));
        assert_eq!(config.rule_severity("line-length"), Some(Severity::Info));

        let rule = config.rules.get("missing-docstring").unwrap();
        assert!(rule.get_bool("require_nested", false));
    }

    #[test]
    fn disabled_rule_is_reported_disabled() {
        let toml = "[rules.line-length]\nenabled = false\n";
        let config = LintConfig::parse(toml).expect("Failed to parse");
        assert!(!config.is_rule_enabled("line-length"));
        assert!(config.is_rule_enabled("other-rule"));
    }

    #[test]
    fn validate_rejects_zero_thresholds() {
        let mut config = LintConfig::default();
        config.indent_width = 0;
        let err = config.validate(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidThreshold { .. }));
    }

    #[test]
    fn validate_rejects_unknown_rule() {
        let mut config = LintConfig::default();
        config.rules.insert("no-such-rule".into(), RuleConfig::default());
        let err = config
            .validate(&[("line-length", "PS102")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnknownRule { .. }));
    }

    #[test]
    fn validate_accepts_rule_by_name_or_code() {
        let mut config = LintConfig::default();
        config.rules.insert("PS102".into(), RuleConfig::default());
        assert!(config.validate(&[("line-length", "PS102")]).is_ok());
    }

    #[test]
    fn validate_rejects_bad_fail_on() {
        let mut config = LintConfig::default();
        config.fail_on = Some("critical".into());
        let err = config.validate(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeverity { .. }));
    }

    #[test]
    fn fail_on_severity_defaults_to_error() {
        assert_eq!(LintConfig::default().fail_on_severity(), Severity::Error);
        let mut config = LintConfig::default();
        config.fail_on = Some("warning".into());
        assert_eq!(config.fail_on_severity(), Severity::Warning);
    }
}
