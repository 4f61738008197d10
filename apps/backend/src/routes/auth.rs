use std::time::SystemTime;

use actix_web::{web, HttpRequest, HttpResponse};

use super::SuccessResponse;
use crate::auth::claims::{Claims, IdentityClaim};
use crate::auth::cookie::{cleared_cookie, session_cookie, token_from_request};
use crate::auth::jwt::{issue_token, verify_token};
use crate::error::AppError;
use crate::extractors::current_identity::CurrentIdentity;
use crate::logging::security;
use crate::middleware::require_session::RequireSession;
use crate::state::app_state::AppState;
use crate::store::Document;

/// Issue a session for the claimed identity and set it as the session
/// cookie. Re-login simply overwrites the previous cookie.
async fn login(
    body: web::Json<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claim = IdentityClaim::from_body(body.into_inner())
        .inspect_err(|_| security::login_rejected("invalid_email", None))?;

    if !app_state.identities.is_known(&claim.email) {
        security::login_rejected("unknown_identity", Some(&claim.email));
        return Err(AppError::email_not_allowed());
    }

    let token = issue_token(&claim, SystemTime::now(), &app_state.security)?;
    security::login_succeeded(&claim.email);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token, &app_state.cookies))
        .json(SuccessResponse::ok()))
}

/// Overwrite the session cookie with an expired one. Works with or without a
/// valid session; the request body is ignored.
async fn logout(req: HttpRequest, app_state: web::Data<AppState>) -> HttpResponse {
    let email = token_from_request(&req)
        .and_then(|token| verify_token(&token, &app_state.security).ok())
        .map(|claims| claims.identity.email);
    security::logout(email.as_deref());

    HttpResponse::Ok()
        .cookie(cleared_cookie(&app_state.cookies))
        .json(SuccessResponse::ok())
}

/// Echo the verified identity back to the caller.
async fn session(identity: CurrentIdentity) -> web::Json<Claims> {
    web::Json(identity.into_inner())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/jwt", "/api/auth/login"]).route(web::post().to(login)))
        .service(web::resource(["/logout", "/api/auth/logout"]).route(web::post().to(logout)))
        .service(
            web::resource(["/session", "/api/auth/session"])
                .wrap(RequireSession)
                .route(web::get().to(session)),
        );
}
