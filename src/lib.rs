//! PSL Engine - Public Suffix List lookups for Rust
//!
//! This library classifies host names against the Public Suffix List:
//! - Rule list parsing (normal, wildcard and exception rules)
//! - Label tree indexed right to left
//! - Effective public suffix lookup (`find_tld`)
//! - Registrable domain derivation (`second_level_domain`)
//! - Process-wide, lazily built manager with optional LRU caching
//!
//! # Example
//!
//! ```rust
//! use psl_engine_r::{ManagerOptions, MemoryRuleLoader, SuffixManager};
//!
//! let rules_text = "
//! // ===BEGIN ICANN DOMAINS===
//! com
//! uk
//! co.uk
//! *.ck
//! !www.ck
//! ";
//!
//! let loader = MemoryRuleLoader::new(rules_text);
//! let manager = SuffixManager::new(&loader, ManagerOptions::default());
//!
//! assert_eq!(manager.find_tld("example.co.uk"), "co.uk");
//! assert_eq!(manager.find_tld("foo.ck"), "foo.ck");
//! assert_eq!(manager.find_tld("www.ck"), "ck");
//! assert_eq!(manager.second_level_domain("www.example.co.uk"), "example.co.uk");
//! assert_eq!(manager.second_level_domain("example.invalidtld"), "");
//! ```
//!
//! # Rule Syntax
//!
//! One rule per line, as published at <https://publicsuffix.org/list/>:
//!
//! | Line | Kind | Meaning |
//! |------|------|---------|
//! | `// ...` | - | Comment, ignored |
//! | *(empty)* | - | Ignored |
//! | `co.uk` | Normal | `co.uk` is a public suffix |
//! | `*.ck` | Wildcard | Any single label before `ck` is a public suffix |
//! | `!www.ck` | Exception | `www.ck` is registrable despite `*.ck` |
//!
//! Exceptions outrank every other rule; otherwise the rule with more labels wins.
//!
//! Domains passed to lookups must already be lower-cased and in ASCII
//! (punycode) form.

pub mod error;
pub mod loader;
pub mod manager;
pub mod parser;
pub mod registrable;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use error::{LoadErrorKind, PslError, Result};
#[cfg(feature = "bundled")]
pub use loader::{BundledRuleLoader, BUNDLED_RULES};
pub use loader::{FileRuleLoader, MemoryRuleLoader, NilRuleLoader, RuleLoader};
pub use manager::{ManagerOptions, SuffixManager, DEFAULT_CACHE_SIZE};
pub use parser::{parse_line, parse_rules, parse_rules_from_file};
pub use registrable::{find_rule, find_tld, registrable_domain, second_level_domain};
pub use tree::{SuffixTree, SuffixTreeNode};
pub use types::{Rule, RuleKind};
