use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Regex patterns shared by redaction and input validation.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    /// Email pattern: matches addresses embedded in free text
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Anchored email pattern: the whole input must be one address
    pub fn email_exact() -> &'static Regex {
        static EMAIL_EXACT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
                .unwrap()
        });
        &EMAIL_EXACT_REGEX
    }

    /// JWT-like pattern: three base64url segments separated by dots
    pub fn jwt() -> &'static Regex {
        static JWT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\.[A-Za-z0-9_-]{8,}\b").unwrap()
        });
        &JWT_REGEX
    }
}

/// Whether `input` is a single, plausibly deliverable email address.
pub fn is_valid_email(input: &str) -> bool {
    PiiRegexRegistry::email_exact().is_match(input)
}

/// Masks emails (first character of the local part kept, domain kept) and
/// replaces signed tokens with `[REDACTED_TOKEN]`.
pub fn redact(input: &str) -> String {
    let tokens_redacted = PiiRegexRegistry::jwt().replace_all(input, "[REDACTED_TOKEN]");

    PiiRegexRegistry::email()
        .replace_all(&tokens_redacted, |caps: &regex::Captures| {
            let full_match = &caps[0];
            match full_match.find('@') {
                Some(0) | None => full_match.to_string(),
                Some(at_pos) => {
                    let first = full_match[..at_pos].chars().next().unwrap_or('*');
                    format!("{first}***{}", &full_match[at_pos..])
                }
            }
        })
        .to_string()
}

/// Wrapper that redacts when formatted, for use in log fields.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
