//! Rule base loading
//!
//! A rule base is read once at startup, either from the table compiled into
//! the binary or from a YAML/TOML file on disk.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::Lazy;

use super::base::RuleBase;

/// The rule table shipped with the binary
pub const DEFAULT_RULES_YAML: &str = include_str!("default_rules.yaml");

static DEFAULT_RULES: Lazy<Option<Arc<RuleBase>>> = Lazy::new(|| {
    match EmbeddedRuleSource.load() {
        Ok(rules) => Some(Arc::new(rules)),
        Err(e) => {
            tracing::warn!("Embedded rule base is broken: {}", e);
            None
        }
    }
});

/// Error type for rule base loading
#[derive(Debug, thiserror::Error)]
pub enum RuleLoadError {
    #[error("Failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported rule file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid rule base: {0}")]
    Invalid(String),
}

/// Something that can produce a rule base
pub trait RuleSource {
    fn load(&self) -> Result<RuleBase, RuleLoadError>;

    /// Human readable origin, used in log lines
    fn describe(&self) -> String;
}

/// Loads the default table compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedRuleSource;

impl RuleSource for EmbeddedRuleSource {
    fn load(&self) -> Result<RuleBase, RuleLoadError> {
        parse_yaml(DEFAULT_RULES_YAML)
    }

    fn describe(&self) -> String {
        "embedded default rules".to_string()
    }
}

/// Loads a rule file, picking the parser from the extension
#[derive(Debug, Clone)]
pub struct FileRuleSource {
    path: PathBuf,
}

impl FileRuleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RuleSource for FileRuleSource {
    fn load(&self) -> Result<RuleBase, RuleLoadError> {
        let extension = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let content = std::fs::read_to_string(&self.path).map_err(|source| RuleLoadError::Io {
            path: self.path.clone(),
            source,
        })?;

        match extension.as_deref() {
            Some("yaml") | Some("yml") => parse_yaml(&content),
            Some("toml") => parse_toml(&content),
            _ => Err(RuleLoadError::UnsupportedFormat(self.path.clone())),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse and validate a YAML rule table
pub fn parse_yaml(content: &str) -> Result<RuleBase, RuleLoadError> {
    let rules: RuleBase = serde_yaml::from_str(content)?;
    rules.validate().map_err(RuleLoadError::Invalid)?;
    Ok(rules)
}

/// Parse and validate a TOML rule table
pub fn parse_toml(content: &str) -> Result<RuleBase, RuleLoadError> {
    let rules: RuleBase = toml::from_str(content)?;
    rules.validate().map_err(RuleLoadError::Invalid)?;
    Ok(rules)
}

/// The embedded rule base, parsed on first use and shared afterwards.
///
/// `None` only if the compiled-in table fails to parse.
pub fn default_rule_base() -> Option<Arc<RuleBase>> {
    DEFAULT_RULES.clone()
}
