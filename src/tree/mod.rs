//! Public suffix rule tree.
//!
//! Rules are indexed by their labels read right to left, so a lookup walks
//! the tree once per domain label:
//!
//! ```
//! use psl_engine_r::parser::parse_rules;
//! use psl_engine_r::tree::SuffixTree;
//!
//! let tree = SuffixTree::build(parse_rules("uk\nco.uk\n*.ck\n!www.ck"));
//!
//! assert_eq!(tree.find_tld("example.co.uk"), "co.uk");
//! assert_eq!(tree.find_tld("foo.ck"), "foo.ck"); // wildcard
//! assert_eq!(tree.find_tld("www.ck"), "ck");     // exception
//! ```

mod node;
mod suffix_tree;

pub use node::{NodeId, SuffixTreeNode};
pub use suffix_tree::{effective_suffix, SuffixTree};
