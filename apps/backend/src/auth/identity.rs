//! Identity directory consulted before a session is issued.

use std::fmt::Debug;

use crate::config::email_allowlist::EmailAllowlist;
use crate::logging::pii::is_valid_email;

/// Source of truth for which identities may hold a session.
pub trait IdentityDirectory: Debug + Send + Sync {
    fn is_known(&self, email: &str) -> bool;
}

impl IdentityDirectory for EmailAllowlist {
    fn is_known(&self, email: &str) -> bool {
        self.is_allowed(email)
    }
}

/// Accepts every well-formed address. Only used outside production when no
/// allowlist is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenDirectory;

impl IdentityDirectory for OpenDirectory {
    fn is_known(&self, email: &str) -> bool {
        is_valid_email(email)
    }
}
