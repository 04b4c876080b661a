use std::collections::HashMap;

use crate::types::Rule;

/// Index of a node inside its tree's arena.
pub type NodeId = usize;

/// Label that matches any single domain label
pub(crate) const WILDCARD_LABEL: &str = "*";

/// One label of a suffix at one depth.
///
/// Children are keyed by label text. The parent link is an arena index used
/// for walking back toward the root; the arena owns every node.
#[derive(Debug, Clone)]
pub struct SuffixTreeNode {
    label: String,
    rule: Rule,
    parent: Option<NodeId>,
    children: HashMap<String, NodeId>,
}

impl SuffixTreeNode {
    pub(crate) fn new(label: String, rule: Rule, parent: Option<NodeId>) -> Self {
        Self {
            label,
            rule,
            parent,
            children: HashMap::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Rule attached to this node, or the `None` sentinel
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child keyed by exactly `label`
    pub fn child(&self, label: &str) -> Option<NodeId> {
        self.children.get(label).copied()
    }

    /// Children matching one domain label: the exact child and the `*` child.
    pub(crate) fn matching_children<'a>(
        &'a self,
        label: &str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        let exact = self.children.get(label);
        let wildcard = if label == WILDCARD_LABEL {
            None
        } else {
            self.children.get(WILDCARD_LABEL)
        };
        exact.into_iter().chain(wildcard).copied()
    }

    pub(crate) fn add_child(&mut self, label: String, id: NodeId) {
        self.children.insert(label, id);
    }

    pub(crate) fn set_rule(&mut self, rule: Rule) {
        self.rule = rule;
    }
}
