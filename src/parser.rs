use std::fs;
use std::io;
use std::path::Path;

use crate::error::{LoadErrorKind, PslError, Result};
use crate::types::{Rule, RuleKind};

/// Comment marker in the rule list format
const COMMENT_PREFIX: &str = "//";

/// Parse public suffix rules from rule-list text.
///
/// Blank lines and `//` comments are skipped. Every other line yields exactly
/// one rule; malformed lines are kept as degenerate rules instead of failing
/// the whole list.
pub fn parse_rules(text: &str) -> Vec<Rule> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(parse_line)
        .collect()
}

/// Parse public suffix rules from a file.
pub fn parse_rules_from_file(path: impl AsRef<Path>) -> Result<Vec<Rule>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        let kind = if e.kind() == io::ErrorKind::InvalidData {
            LoadErrorKind::InvalidData
        } else {
            LoadErrorKind::FileError
        };
        PslError::load(
            kind,
            format!("Failed to read rule list '{}': {}", path.display(), e),
        )
    })?;
    Ok(parse_rules(&text))
}

/// Parse a single, non-comment rule line
pub fn parse_line(line: &str) -> Rule {
    let (kind, pattern) = if let Some(rest) = line.strip_prefix('!') {
        (RuleKind::Exception, rest)
    } else if line.starts_with('*') {
        (RuleKind::Wildcard, line)
    } else {
        (RuleKind::Normal, line)
    };

    let label_count = pattern.matches('.').count() + 1;
    Rule::new(kind, label_count, pattern)
}
