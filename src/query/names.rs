//! Subdomain name extraction and cleaning.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NAME_STRIP_PATTERN;

#[allow(clippy::expect_used)] // Constant pattern, covered by tests
static NAME_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(NAME_STRIP_PATTERN).expect("name strip pattern must compile"));

/// Accumulated reverse-lookup hostnames of one root domain.
///
/// Owned by a single query loop and dropped when it ends.
#[derive(Debug, Default)]
pub struct ReverseNames {
    names: Vec<String>,
}

impl ReverseNames {
    /// Appends one hostname as returned by the provider.
    pub fn push(&mut self, name: String) {
        self.names.push(name);
    }

    /// Number of hostnames gathered, duplicates included.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if no hostname was gathered.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All hostnames, each followed by a single space.
    pub fn as_text(&self) -> String {
        let mut text = String::with_capacity(self.names.iter().map(|n| n.len() + 1).sum());
        for name in &self.names {
            text.push_str(name);
            text.push(' ');
        }
        text
    }

    /// Every match of `pattern` in the aggregated text, cleaned, in order.
    ///
    /// Matches that clean down to nothing are dropped.
    pub fn extract(&self, pattern: &Regex) -> Vec<String> {
        let text = self.as_text();
        pattern
            .find_iter(&text)
            .map(|m| clean_name(m.as_str()))
            .filter(|name| !name.is_empty())
            .collect()
    }
}

/// Normalizes a raw name match: trims whitespace, lower-cases, strips leading
/// and trailing dots/dashes and leading URL-escape leftovers.
pub fn clean_name(raw: &str) -> String {
    let mut name = raw.trim().to_lowercase();
    loop {
        let trimmed = name.trim_matches(|c| c == '-' || c == '.');
        match NAME_STRIP_RE.find(trimmed) {
            Some(m) => name = trimmed[m.end()..].to_string(),
            None => return trimmed.to_string(),
        }
    }
}
