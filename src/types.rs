use std::fmt;

/// Precedence class of a public suffix rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleKind {
    /// Plain suffix: "co.uk"
    Normal,
    /// Any single label before a fixed suffix: "*.ck"
    Wildcard,
    /// Carve-out from a wildcard: "!www.ck"
    Exception,
    /// No rule present (empty tree nodes, failed lookups)
    #[default]
    None,
}

/// A single public suffix rule.
///
/// `pattern` is the dataset text with the leading `!` of exception rules
/// removed; wildcard rules keep their leading `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    kind: RuleKind,
    label_count: usize,
    pattern: String,
}

impl Rule {
    /// Create a rule from its parts. No consistency check is made between
    /// `label_count` and `pattern`; the tree rejects inconsistent rules on insert.
    pub fn new(kind: RuleKind, label_count: usize, pattern: impl Into<String>) -> Self {
        Self {
            kind,
            label_count,
            pattern: pattern.into(),
        }
    }

    /// The "no rule" sentinel
    pub fn none() -> Self {
        Self::default()
    }

    pub fn kind(&self) -> RuleKind {
        self.kind
    }

    /// Number of labels in the pattern (0 for the sentinel)
    pub fn label_count(&self) -> usize {
        self.label_count
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_none(&self) -> bool {
        self.kind == RuleKind::None
    }

    pub fn is_exception(&self) -> bool {
        self.kind == RuleKind::Exception
    }

    /// Labels of the pattern, left to right
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.pattern.split('.')
    }

    /// Left-most label of the pattern: the label the rule's own node is keyed by
    pub fn first_label(&self) -> &str {
        self.pattern.split('.').next().unwrap_or_default()
    }
}

impl fmt::Display for Rule {
    /// Renders the rule as a rule-list line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RuleKind::None => Ok(()),
            RuleKind::Exception => write!(f, "!{}", self.pattern),
            RuleKind::Normal | RuleKind::Wildcard => f.write_str(&self.pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_sentinel() {
        let rule = Rule::none();
        assert!(rule.is_none());
        assert_eq!(rule.label_count(), 0);
        assert_eq!(rule.pattern(), "");
        assert_eq!(rule.to_string(), "");
    }

    #[test]
    fn test_first_label() {
        assert_eq!(Rule::new(RuleKind::Normal, 2, "co.uk").first_label(), "co");
        assert_eq!(Rule::new(RuleKind::Wildcard, 2, "*.ck").first_label(), "*");
        assert_eq!(Rule::new(RuleKind::Normal, 1, "com").first_label(), "com");
    }

    #[test]
    fn test_labels_reversed() {
        let rule = Rule::new(RuleKind::Exception, 3, "city.kawasaki.jp");
        let labels: Vec<&str> = rule.labels().rev().collect();
        assert_eq!(labels, vec!["jp", "kawasaki", "city"]);
    }

    #[test]
    fn test_display_restores_exception_marker() {
        assert_eq!(Rule::new(RuleKind::Exception, 2, "www.ck").to_string(), "!www.ck");
        assert_eq!(Rule::new(RuleKind::Wildcard, 2, "*.ck").to_string(), "*.ck");
        assert_eq!(Rule::new(RuleKind::Normal, 2, "co.uk").to_string(), "co.uk");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let rule = Rule::new(RuleKind::Wildcard, 2, "*.ck");
        let json = serde_json::to_string(&rule).unwrap();
        assert!(json.contains("Wildcard"), "got: {}", json);
        let back: Rule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rule);
    }
}
