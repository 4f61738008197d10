//! Session cookie lifecycle: set on login, cleared on logout.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

use crate::auth::jwt::TOKEN_TTL_SECS;
use crate::config::env::RuntimeEnv;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

/// Transport attributes applied to the session cookie, both when it is set
/// and when it is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub secure: bool,
    pub same_site: SameSite,
}

impl CookiePolicy {
    /// Production serves a cross-origin client over TLS, so the cookie must be
    /// `Secure; SameSite=None`. Everywhere else it runs over plain HTTP on a
    /// same-site origin and stays `SameSite=Strict`.
    pub fn for_env(env: RuntimeEnv) -> Self {
        if env.is_production() {
            Self {
                secure: true,
                same_site: SameSite::None,
            }
        } else {
            Self {
                secure: false,
                same_site: SameSite::Strict,
            }
        }
    }
}

fn base_cookie(value: String, policy: &CookiePolicy) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(policy.secure)
        .same_site(policy.same_site)
        .finish()
}

/// Cookie that carries `token` for the token's whole lifetime.
pub fn session_cookie(token: String, policy: &CookiePolicy) -> Cookie<'static> {
    let mut cookie = base_cookie(token, policy);
    cookie.set_max_age(Duration::seconds(TOKEN_TTL_SECS));
    cookie
}

/// Empty, already-expired cookie that overwrites the session cookie.
pub fn cleared_cookie(policy: &CookiePolicy) -> Cookie<'static> {
    let mut cookie = base_cookie(String::new(), policy);
    cookie.make_removal();
    cookie
}

/// Session token sent with the request, if any. An empty value (what a
/// cleared cookie looks like if a client echoes it back) counts as absent.
pub fn token_from_request(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}
