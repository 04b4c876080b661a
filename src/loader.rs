use std::path::{Path, PathBuf};

use crate::error::{LoadErrorKind, PslError, Result};
use crate::parser::{parse_rules, parse_rules_from_file};
use crate::types::Rule;

/// Rule list compiled into the crate
#[cfg(feature = "bundled")]
pub const BUNDLED_RULES: &str = include_str!("../data/public_suffix_list.dat");

/// Trait for loading public suffix rules
pub trait RuleLoader: Send + Sync {
    /// Load and parse the complete rule set
    fn load_rules(&self) -> Result<Vec<Rule>>;
}

/// Loader for the rule list bundled with the crate
#[cfg(feature = "bundled")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledRuleLoader;

#[cfg(feature = "bundled")]
impl RuleLoader for BundledRuleLoader {
    fn load_rules(&self) -> Result<Vec<Rule>> {
        Ok(parse_rules(BUNDLED_RULES))
    }
}

/// File-based rule loader
#[derive(Debug, Clone, Default)]
pub struct FileRuleLoader {
    path: Option<PathBuf>,
}

impl FileRuleLoader {
    /// Create a new FileRuleLoader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule list path
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl RuleLoader for FileRuleLoader {
    fn load_rules(&self) -> Result<Vec<Rule>> {
        let path = self.path.as_ref().ok_or_else(|| {
            PslError::load(LoadErrorKind::NotConfigured, "rule list path not configured")
        })?;
        parse_rules_from_file(path)
    }
}

/// In-memory rule loader
#[derive(Debug, Clone, Default)]
pub struct MemoryRuleLoader {
    text: String,
}

impl MemoryRuleLoader {
    /// Create a loader over rule-list text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl RuleLoader for MemoryRuleLoader {
    fn load_rules(&self) -> Result<Vec<Rule>> {
        Ok(parse_rules(&self.text))
    }
}

/// Nil loader that always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NilRuleLoader;

impl RuleLoader for NilRuleLoader {
    fn load_rules(&self) -> Result<Vec<Rule>> {
        Err(PslError::load(
            LoadErrorKind::NotConfigured,
            "no rule list configured",
        ))
    }
}
