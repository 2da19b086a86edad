//! Enumeration scope: the root domains and their naming patterns.

use std::collections::HashMap;

use regex::Regex;

use crate::config::constants::SUBDOMAIN_LABELS_PATTERN;
use crate::error_handling::ScopeError;

/// Root domains to enumerate together with the pattern used to pull
/// subdomain names of each one out of free text.
///
/// Domains are lower-cased, stripped of a trailing dot and de-duplicated
/// while keeping their original order.
#[derive(Debug, Clone)]
pub struct Scope {
    domains: Vec<String>,
    patterns: HashMap<String, Regex>,
}

impl Scope {
    /// Builds a scope from a list of root domains.
    ///
    /// # Errors
    ///
    /// Returns `ScopeError::NoDomains` for an empty list, `ScopeError::InvalidDomain`
    /// for a name that cannot be a DNS domain, or `ScopeError::Pattern` if the
    /// naming pattern fails to compile.
    pub fn new<I, S>(domains: I) -> Result<Self, ScopeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut patterns = HashMap::new();

        for raw in domains {
            let domain = normalize_root_domain(raw.as_ref())?;
            if patterns.contains_key(&domain) {
                continue;
            }
            let pattern = build_domain_regex(&domain).map_err(|source| ScopeError::Pattern {
                domain: domain.clone(),
                source,
            })?;
            patterns.insert(domain.clone(), pattern);
            ordered.push(domain);
        }

        if ordered.is_empty() {
            return Err(ScopeError::NoDomains);
        }

        Ok(Scope {
            domains: ordered,
            patterns,
        })
    }

    /// Root domains in configuration order.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Naming pattern for `domain`, if it is part of the scope.
    pub fn domain_regex(&self, domain: &str) -> Option<&Regex> {
        self.patterns.get(domain)
    }
}

/// Normalizes a root domain: trims whitespace and a trailing dot, lower-cases.
pub fn normalize_root_domain(raw: &str) -> Result<String, ScopeError> {
    let domain = raw.trim().trim_end_matches('.').to_ascii_lowercase();

    if domain.is_empty() {
        return Err(ScopeError::InvalidDomain(raw.to_string()));
    }

    let valid_chars = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_');
    if !valid_chars || domain.starts_with('.') || domain.contains("..") {
        return Err(ScopeError::InvalidDomain(raw.to_string()));
    }

    Ok(domain)
}

/// Builds the pattern matching any subdomain of `domain` (at least one label deep).
pub fn build_domain_regex(domain: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "{}{}",
        SUBDOMAIN_LABELS_PATTERN,
        regex::escape(domain)
    ))
}
