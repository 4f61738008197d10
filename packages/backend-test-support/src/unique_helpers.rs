//! Unique test data so tests sharing a store never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}` with the ulid lowercased.
///
/// ```
/// use bugshield_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("service");
/// assert_ne!(a, unique_str("service"));
/// assert!(a.starts_with("service-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new().to_string().to_lowercase())
}

/// A well-formed address under `example.com`, unique per call.
///
/// ```
/// use bugshield_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("provider");
/// assert!(email.starts_with("provider-"));
/// assert!(email.ends_with("@example.com"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}@example.com", unique_str(prefix))
}
