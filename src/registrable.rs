//! Registrable-domain derivation and lookups on the global manager.

use crate::manager::SuffixManager;
use crate::types::Rule;

/// Combine `host` with its already computed public `suffix` into the
/// registrable domain (the suffix plus one label).
///
/// An empty host or suffix yields an empty string. When nothing but the
/// suffix precedes the host's end, the host is returned unchanged.
pub fn registrable_domain(host: &str, suffix: &str) -> String {
    if suffix.is_empty() || host.is_empty() {
        return String::new();
    }

    let Some(mut prefix) = host
        .len()
        .checked_sub(suffix.len())
        .and_then(|end| host.get(..end))
    else {
        return String::new();
    };

    if !prefix.contains('.') {
        return host.to_string();
    }

    while prefix.matches('.').count() > 1 {
        match prefix.split_once('.') {
            Some((_, rest)) => prefix = rest,
            None => break,
        }
    }

    format!("{prefix}{suffix}")
}

/// Effective public suffix of a lower-cased domain, using the global manager.
pub fn find_tld(domain: &str) -> String {
    SuffixManager::instance().find_tld(domain)
}

/// Winning rule for a lower-cased domain, using the global manager.
pub fn find_rule(domain: &str) -> Rule {
    SuffixManager::instance().find_rule(domain)
}

/// Registrable domain of `host`, using the global manager.
pub fn second_level_domain(host: &str) -> String {
    SuffixManager::instance().second_level_domain(host)
}
