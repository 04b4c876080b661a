//! Process-wide public suffix manager.
//!
//! The manager owns one immutable [`SuffixTree`] and is the entry point used
//! by the rest of the application. The global instance is built on first
//! access; [`SuffixManager::init_global`] installs a configured one instead,
//! and must complete before any concurrent lookup relies on that configuration.

use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing::warn;

use crate::error::{PslError, Result};
use crate::loader::RuleLoader;
use crate::registrable::registrable_domain;
use crate::tree::SuffixTree;
use crate::types::Rule;

/// Default result cache size (disabled)
pub const DEFAULT_CACHE_SIZE: usize = 0;

static GLOBAL: OnceCell<SuffixManager> = OnceCell::new();

/// Suffix manager options.
#[derive(Debug, Clone)]
pub struct ManagerOptions {
    /// LRU cache size for `second_level_domain` results; 0 disables the cache
    pub cache_size: usize,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl ManagerOptions {
    /// Create new manager options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cache size.
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }
}

/// Answers public suffix and registrable-domain queries.
pub struct SuffixManager {
    tree: SuffixTree,
    cache: Option<Mutex<LruCache<String, String>>>,
}

impl SuffixManager {
    /// Build a manager from a loader.
    ///
    /// A failed load is not fatal: the tree stays empty and every lookup
    /// returns an empty result.
    pub fn new(loader: &dyn RuleLoader, options: ManagerOptions) -> Self {
        let rules = match loader.load_rules() {
            Ok(rules) => rules,
            Err(e) => {
                warn!(error = %e, "public suffix data unavailable, suffix lookups will be empty");
                Vec::new()
            }
        };
        Self::from_rules(rules, options)
    }

    /// Build a manager, failing instead of degrading when the load fails.
    pub fn try_new(loader: &dyn RuleLoader, options: ManagerOptions) -> Result<Self> {
        let rules = loader.load_rules()?;
        Ok(Self::from_rules(rules, options))
    }

    /// Build a manager from already parsed rules.
    pub fn from_rules(rules: Vec<Rule>, options: ManagerOptions) -> Self {
        let cache = NonZeroUsize::new(options.cache_size).map(|size| Mutex::new(LruCache::new(size)));
        Self {
            tree: SuffixTree::build(rules),
            cache,
        }
    }

    /// Global instance, built from the default loader on first access.
    pub fn instance() -> &'static SuffixManager {
        GLOBAL.get_or_init(|| Self::new(&*default_loader(), ManagerOptions::default()))
    }

    /// Install a configured global instance.
    ///
    /// Fails with [`PslError::AlreadyInitialized`] once the global instance
    /// exists, whether it was installed here or built by [`Self::instance`].
    pub fn init_global(
        loader: &dyn RuleLoader,
        options: ManagerOptions,
    ) -> Result<&'static SuffixManager> {
        if GLOBAL.get().is_some() {
            return Err(PslError::AlreadyInitialized);
        }
        GLOBAL
            .set(Self::new(loader, options))
            .map_err(|_| PslError::AlreadyInitialized)?;
        Ok(Self::instance())
    }

    /// Effective public suffix of a lower-cased domain, or an empty string.
    pub fn find_tld(&self, domain: &str) -> String {
        self.tree.find_tld(domain)
    }

    /// Winning rule for a lower-cased domain, or the `None` sentinel.
    pub fn find_rule(&self, domain: &str) -> Rule {
        self.tree.find(domain)
    }

    /// Registrable domain of `host`: its public suffix plus one label.
    ///
    /// Returns an empty string when no suffix is known. Hosts are expected in
    /// ASCII (punycode) form; labels left of the suffix keep their case.
    pub fn second_level_domain(&self, host: &str) -> String {
        let Some(cache) = &self.cache else {
            return self.derive_second_level_domain(host);
        };

        let mut cache = cache.lock();
        if let Some(hit) = cache.get(host) {
            return hit.clone();
        }

        // Held across the derivation so concurrent misses compute once
        let result = self.derive_second_level_domain(host);
        cache.put(host.to_string(), result.clone());
        result
    }

    fn derive_second_level_domain(&self, host: &str) -> String {
        let suffix = self.find_tld(&host.to_ascii_lowercase());
        registrable_domain(host, &suffix)
    }

    /// Registrable domain of `host`, or `host` itself when no suffix is known.
    pub fn second_level_domain_or_host(&self, host: &str) -> String {
        let domain = self.second_level_domain(host);
        if domain.is_empty() {
            host.to_string()
        } else {
            domain
        }
    }

    /// True when the two hosts belong to different registrable domains.
    pub fn is_third_party(&self, request_host: &str, first_party_host: &str) -> bool {
        let request = self.second_level_domain_or_host(request_host);
        let first_party = self.second_level_domain_or_host(first_party_host);
        !request.eq_ignore_ascii_case(&first_party)
    }

    pub fn tree(&self) -> &SuffixTree {
        &self.tree
    }

    /// Number of rules loaded
    pub fn rule_count(&self) -> usize {
        self.tree.rule_count()
    }

    /// True when no rule data is available
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clear the result cache
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }
}

impl fmt::Debug for SuffixManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuffixManager")
            .field("rules", &self.tree.rule_count())
            .field("nodes", &self.tree.node_count())
            .field("cache", &self.cache.as_ref().map(|c| c.lock().cap()))
            .finish()
    }
}

#[cfg(feature = "bundled")]
fn default_loader() -> Box<dyn RuleLoader> {
    Box::new(crate::loader::BundledRuleLoader)
}

#[cfg(not(feature = "bundled"))]
fn default_loader() -> Box<dyn RuleLoader> {
    Box::new(crate::loader::NilRuleLoader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{MemoryRuleLoader, NilRuleLoader};
    use crate::types::RuleKind;

    const RULES: &str = "com\nuk\nco.uk\n*.ck\n!www.ck\njp\n*.kawasaki.jp\n!city.kawasaki.jp\n";

    fn manager() -> SuffixManager {
        SuffixManager::new(&MemoryRuleLoader::new(RULES), ManagerOptions::default())
    }

    #[test]
    fn test_find_tld() {
        let m = manager();
        assert_eq!(m.find_tld("example.com"), "com");
        assert_eq!(m.find_tld("example.co.uk"), "co.uk");
        assert_eq!(m.find_tld("www.ck"), "ck");
        assert_eq!(m.find_tld("foo.ck"), "foo.ck");
        assert_eq!(m.find_tld("city.kawasaki.jp"), "kawasaki.jp");
        assert_eq!(m.find_tld("example.invalidtld"), "");
    }

    #[test]
    fn test_find_rule() {
        let m = manager();
        assert_eq!(m.find_rule("www.ck").kind(), RuleKind::Exception);
        assert_eq!(m.find_rule("foo.ck").pattern(), "*.ck");
        assert!(m.find_rule("example.invalidtld").is_none());
    }

    #[test]
    fn test_second_level_domain() {
        let m = manager();
        assert_eq!(m.second_level_domain("example.com"), "example.com");
        assert_eq!(m.second_level_domain("www.example.com"), "example.com");
        assert_eq!(m.second_level_domain("a.b.example.co.uk"), "example.co.uk");
        assert_eq!(m.second_level_domain("foo.ck"), "foo.ck");
        assert_eq!(m.second_level_domain("a.b.foo.ck"), "b.foo.ck");
        assert_eq!(m.second_level_domain("www.ck"), "www.ck");
        assert_eq!(m.second_level_domain("mail.city.kawasaki.jp"), "city.kawasaki.jp");
        assert_eq!(m.second_level_domain("example.invalidtld"), "");
        assert_eq!(m.second_level_domain(""), "");
    }

    #[test]
    fn test_second_level_domain_mixed_case() {
        let m = manager();
        assert_eq!(m.second_level_domain("WWW.Example.COM"), "Example.com");
    }

    #[test]
    fn test_second_level_domain_or_host() {
        let m = manager();
        assert_eq!(m.second_level_domain_or_host("www.example.com"), "example.com");
        assert_eq!(m.second_level_domain_or_host("localhost"), "localhost");
    }

    #[test]
    fn test_is_third_party() {
        let m = manager();
        assert!(!m.is_third_party("cdn.example.com", "www.example.com"));
        assert!(!m.is_third_party("CDN.EXAMPLE.COM", "www.example.com"));
        assert!(m.is_third_party("tracker.com", "www.example.com"));
        assert!(m.is_third_party("a.example.co.uk", "b.other.co.uk"));
        assert!(!m.is_third_party("localhost", "localhost"));
    }

    #[test]
    fn test_degrades_when_load_fails() {
        let m = SuffixManager::new(&NilRuleLoader, ManagerOptions::default());
        assert!(m.is_empty());
        assert_eq!(m.find_tld("example.com"), "");
        assert!(m.find_rule("example.com").is_none());
        assert_eq!(m.second_level_domain("example.com"), "");
    }

    #[test]
    fn test_try_new_propagates_load_error() {
        let result = SuffixManager::try_new(&NilRuleLoader, ManagerOptions::default());
        assert!(matches!(result, Err(PslError::LoadError { .. })));
    }

    #[test]
    fn test_cache() {
        let m = SuffixManager::new(
            &MemoryRuleLoader::new(RULES),
            ManagerOptions::new().with_cache_size(2),
        );

        // First call populates, second hits
        assert_eq!(m.second_level_domain("www.example.com"), "example.com");
        assert_eq!(m.second_level_domain("www.example.com"), "example.com");

        // Unknown results are cached too
        assert_eq!(m.second_level_domain("example.invalidtld"), "");
        assert_eq!(m.second_level_domain("example.invalidtld"), "");

        // Eviction does not change answers
        assert_eq!(m.second_level_domain("x.co.uk"), "x.co.uk");
        assert_eq!(m.second_level_domain("www.example.com"), "example.com");

        m.clear_cache();
        assert_eq!(m.second_level_domain("www.example.com"), "example.com");
    }

    #[test]
    fn test_cache_stores_each_miss_once() {
        let m = SuffixManager::new(
            &MemoryRuleLoader::new(RULES),
            ManagerOptions::new().with_cache_size(8),
        );
        let cached = |m: &SuffixManager| m.cache.as_ref().unwrap().lock().len();

        assert_eq!(cached(&m), 0);
        assert_eq!(m.second_level_domain("www.example.com"), "example.com");
        assert_eq!(cached(&m), 1);
        assert_eq!(m.second_level_domain("www.example.com"), "example.com");
        assert_eq!(cached(&m), 1);
        assert_eq!(m.second_level_domain("a.example.co.uk"), "example.co.uk");
        assert_eq!(cached(&m), 2);
    }

    #[test]
    fn test_options_default() {
        let options = ManagerOptions::new();
        assert_eq!(options.cache_size, DEFAULT_CACHE_SIZE);
        assert_eq!(options.with_cache_size(16).cache_size, 16);
    }

    #[test]
    fn test_global_instance_is_shared() {
        let a = SuffixManager::instance();
        let b = SuffixManager::instance();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_init_global_after_instance_fails() {
        let _ = SuffixManager::instance();
        let result = SuffixManager::init_global(&NilRuleLoader, ManagerOptions::default());
        assert!(matches!(result, Err(PslError::AlreadyInitialized)));
    }

    #[test]
    fn test_concurrent_lookups() {
        let m = std::sync::Arc::new(SuffixManager::new(
            &MemoryRuleLoader::new(RULES),
            ManagerOptions::new().with_cache_size(8),
        ));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let m = m.clone();
                std::thread::spawn(move || {
                    let host = format!("host{}.example.co.uk", i);
                    for _ in 0..100 {
                        assert_eq!(m.second_level_domain(&host), "example.co.uk");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
