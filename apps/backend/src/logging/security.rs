//! Security-relevant events, logged under the `security` target.

use tracing::{info, warn};

use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub fn login_succeeded(email: &str) {
    let trace_id = trace_ctx::trace_id();

    info!(
        target: "security",
        event = "SECURITY_LOGIN_SUCCEEDED",
        %trace_id,
        email = %Redacted(email),
        "Session issued"
    );
}

pub fn login_rejected(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        target: "security",
        event = "SECURITY_LOGIN_REJECTED",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        reason,
        "Login rejected"
    );
}

pub fn session_rejected(reason: &str, path: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        target: "security",
        event = "SECURITY_SESSION_REJECTED",
        %trace_id,
        reason,
        path,
        "Protected route rejected"
    );
}

pub fn logout(email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();

    info!(
        target: "security",
        event = "SECURITY_LOGOUT",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        "Session cleared"
    );
}
