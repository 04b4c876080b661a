use std::cmp::Ordering;

use tracing::{debug, trace, warn};

use super::node::{NodeId, SuffixTreeNode, WILDCARD_LABEL};
use crate::error::{PslError, Result};
use crate::types::{Rule, RuleKind};

/// Arena index of the root node
const ROOT: NodeId = 0;

/// Label tree of public suffix rules, indexed right to left.
///
/// Depth 1 holds top-level labels, depth 2 the label to their left, and so on.
/// A node carrying a rule sits at depth equal to the rule's label count.
#[derive(Debug, Clone)]
pub struct SuffixTree {
    nodes: Vec<SuffixTreeNode>,
    rule_count: usize,
}

impl Default for SuffixTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SuffixTree {
    /// Create an empty tree holding only the root
    pub fn new() -> Self {
        Self {
            nodes: vec![SuffixTreeNode::new(String::new(), Rule::none(), None)],
            rule_count: 0,
        }
    }

    /// Build a tree from parsed rules.
    ///
    /// Rules are inserted by ascending label count (stable, so file order
    /// breaks ties). Rules that cannot be inserted are dropped with a warning.
    pub fn build(mut rules: Vec<Rule>) -> Self {
        rules.sort_by_key(Rule::label_count);

        let mut tree = Self::new();
        let total = rules.len();
        let mut dropped = 0;
        for rule in rules {
            let label = rule.first_label().to_string();
            if let Err(e) = tree.insert(rule, label) {
                warn!(error = %e, "dropping public suffix rule");
                dropped += 1;
            }
        }

        debug!(
            rules = tree.rule_count,
            dropped,
            total,
            nodes = tree.nodes.len(),
            "built public suffix tree"
        );
        tree
    }

    /// Insert a rule whose own node is keyed by `label`, its left-most label.
    ///
    /// Missing ancestors are created rule-less. Returns `Ok(false)` when an
    /// equal-path rule is already present; the first one is kept.
    pub fn insert(&mut self, rule: Rule, label: String) -> Result<bool> {
        if label != rule.first_label() {
            return Err(PslError::InsertError(format!(
                "label '{}' is not the first label of '{}'",
                label,
                rule.pattern()
            )));
        }

        let parent = self.find_parent_of(&rule)?;

        if let Some(existing) = self.nodes[parent].child(&label) {
            let node = &mut self.nodes[existing];
            if !node.rule().is_none() {
                debug!(rule = %rule, existing = %node.rule(), "ignoring duplicate public suffix rule");
                return Ok(false);
            }
            node.set_rule(rule);
        } else {
            self.append(parent, label, rule);
        }

        self.rule_count += 1;
        Ok(true)
    }

    /// Locate or create the ancestor chain for every label right of the first.
    fn find_parent_of(&mut self, rule: &Rule) -> Result<NodeId> {
        if rule.is_none() {
            return Err(PslError::InsertError(
                "the None rule cannot be inserted".to_string(),
            ));
        }

        let labels: Vec<&str> = rule.labels().collect();
        if rule.label_count() == 0 || labels.len() != rule.label_count() {
            return Err(PslError::InsertError(format!(
                "rule '{}' declares {} labels but has {}",
                rule.pattern(),
                rule.label_count(),
                labels.len()
            )));
        }

        let mut current = ROOT;
        for label in labels[1..].iter().rev() {
            current = match self.nodes[current].child(label) {
                Some(next) => next,
                None => self.append(current, label.to_string(), Rule::none()),
            };
        }
        Ok(current)
    }

    fn append(&mut self, parent: NodeId, label: String, rule: Rule) -> NodeId {
        let id = self.nodes.len();
        self.nodes
            .push(SuffixTreeNode::new(label.clone(), rule, Some(parent)));
        self.nodes[parent].add_child(label, id);
        id
    }

    /// Best rule for `domain`, or the `None` sentinel.
    pub fn find(&self, domain: &str) -> Rule {
        self.best_match(domain).cloned().unwrap_or_default()
    }

    fn best_match(&self, domain: &str) -> Option<&Rule> {
        let labels: Vec<&str> = domain.split('.').collect();
        let best = self
            .find_matching_nodes(&labels)
            .into_iter()
            .map(|id| self.nodes[id].rule())
            .filter(|rule| !rule.is_none())
            .max_by(|a, b| precedence(a, b));

        if let Some(rule) = best {
            trace!(domain, rule = %rule, "public suffix match");
        }
        best
    }

    /// Every node on every path matched by `labels`, consumed right to left.
    ///
    /// Intermediate nodes are included, whether or not they carry a rule.
    pub fn find_matching_nodes(&self, labels: &[&str]) -> Vec<NodeId> {
        let mut matches = Vec::new();
        self.collect_matching(ROOT, labels, &mut matches);
        matches
    }

    fn collect_matching(&self, node: NodeId, labels: &[&str], out: &mut Vec<NodeId>) {
        let Some((last, rest)) = labels.split_last() else {
            return;
        };
        for child in self.nodes[node].matching_children(last) {
            out.push(child);
            self.collect_matching(child, rest, out);
        }
    }

    /// Effective public suffix of `domain`, or an empty string.
    pub fn find_tld(&self, domain: &str) -> String {
        self.best_match(domain)
            .map(|rule| effective_suffix(rule, domain))
            .unwrap_or_default()
    }

    /// Rebuild a node's suffix from its parent links.
    pub fn path_of(&self, id: NodeId) -> String {
        let mut labels = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ROOT {
                break;
            }
            let Some(node) = self.nodes.get(node_id) else {
                break;
            };
            labels.push(node.label());
            current = node.parent();
        }
        labels.join(".")
    }

    pub fn node(&self, id: NodeId) -> Option<&SuffixTreeNode> {
        self.nodes.get(id)
    }

    pub fn root(&self) -> &SuffixTreeNode {
        &self.nodes[ROOT]
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of rules attached to nodes
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }
}

/// Exceptions first, then longer suffixes, then the lexicographically
/// smaller pattern.
fn precedence(a: &Rule, b: &Rule) -> Ordering {
    a.is_exception()
        .cmp(&b.is_exception())
        .then_with(|| a.label_count().cmp(&b.label_count()))
        .then_with(|| b.pattern().cmp(a.pattern()))
}

/// Derive the concrete suffix of `domain` from the rule that won the match.
pub fn effective_suffix(rule: &Rule, domain: &str) -> String {
    let pattern = rule.pattern();
    match rule.kind() {
        RuleKind::Normal => pattern.to_string(),
        RuleKind::Exception => {
            let rest = pattern.split_once('.').map_or(pattern, |(_, rest)| rest);
            if rest.split('.').any(|label| label == WILDCARD_LABEL) {
                domain_tail(domain, rest.split('.').count())
            } else {
                rest.to_string()
            }
        }
        RuleKind::Wildcard => {
            let tail = pattern.strip_prefix(WILDCARD_LABEL).unwrap_or(pattern);
            match domain.rfind(tail) {
                Some(idx) if idx > 0 => {
                    let head = &domain[..idx];
                    let label = head.rsplit('.').next().unwrap_or(head);
                    format!("{label}{tail}")
                }
                _ => String::new(),
            }
        }
        RuleKind::None => String::new(),
    }
}

/// Last `count` labels of `domain`, or all of it when it has fewer.
fn domain_tail(domain: &str, count: usize) -> String {
    let start = count
        .checked_sub(1)
        .and_then(|n| domain.rmatch_indices('.').nth(n))
        .map_or(0, |(idx, _)| idx + 1);
    domain[start..].to_string()
}
