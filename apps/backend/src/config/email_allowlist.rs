//! Email allowlist backing the identity directory.
//!
//! Loaded from the `ALLOWED_EMAILS` environment variable. Entries are exact
//! addresses (`user@example.com`) or `*` globs (`*@example.com`,
//! `user@*.example.com`).

use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone)]
pub struct EmailAllowlist {
    patterns: Vec<String>,
}

impl EmailAllowlist {
    /// Parse a comma-separated pattern list.
    ///
    /// Returns `None` when the list holds no usable pattern. Patterns are
    /// normalized (trimmed, NFKC, lowercased) once, here.
    pub fn parse(raw: &str) -> Option<Self> {
        let patterns: Vec<String> = raw
            .split(',')
            .map(normalize_email)
            .filter(|s| !s.is_empty())
            .collect();

        if patterns.is_empty() {
            return None;
        }

        Some(Self { patterns })
    }

    /// Check whether an email matches any pattern. The email goes through the
    /// same normalization as the patterns.
    pub fn is_allowed(&self, email: &str) -> bool {
        let normalized = normalize_email(email);
        self.patterns
            .iter()
            .any(|pattern| matches_pattern(&normalized, pattern))
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Trim, NFKC-normalize and lowercase an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().nfkc().collect::<String>().to_lowercase()
}

/// Glob match where `*` stands for any (possibly empty) run of characters.
fn matches_pattern(email: &str, pattern: &str) -> bool {
    if !pattern.contains('*') {
        return email == pattern;
    }

    let parts: Vec<&str> = pattern.split('*').collect();
    let (first, rest) = match parts.split_first() {
        Some(split) => split,
        None => return false,
    };
    let (last, middle) = match rest.split_last() {
        Some(split) => split,
        None => return false,
    };

    if !email.starts_with(first) {
        return false;
    }
    let mut remaining = &email[first.len()..];

    for part in middle {
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    remaining.ends_with(last)
}
