//! Session verification middleware.
//!
//! Wraps protected scopes. Reads the session cookie, verifies it and stores
//! the decoded [`Claims`] in request extensions before calling the inner
//! service. Any failure short-circuits with the uniform 401 and the handler
//! never runs.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::Claims;
use crate::auth::cookie::token_from_request;
use crate::auth::jwt::verify_token;
use crate::auth::{AuthError, InvalidReason};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct RequireSession;

impl<S, B> Transform<S, ServiceRequest> for RequireSession
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireSessionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireSessionMiddleware { service }))
    }
}

pub struct RequireSessionMiddleware<S> {
    service: S,
}

/// Resolve the request's session: cookie present, signature and expiry
/// valid, identity still known to the directory.
pub fn authenticate(req: &HttpRequest, state: &AppState) -> Result<Claims, AuthError> {
    let token = token_from_request(req).ok_or(AuthError::Missing)?;
    let claims = verify_token(&token, &state.security)?;

    // Dropping an address from the directory ends its live sessions.
    if !state.identities.is_known(&claims.identity.email) {
        return Err(AuthError::Invalid(InvalidReason::UnknownIdentity));
    }

    Ok(claims)
}

impl<S, B> Service<ServiceRequest> for RequireSessionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // `None` means the app was built without state.
        let outcome: Result<Claims, Option<AuthError>> =
            match req.app_data::<web::Data<AppState>>() {
                Some(state) => authenticate(req.request(), state).map_err(Some),
                None => Err(None),
            };

        match outcome {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            // Logged and rendered inside the future so both carry the
            // request's trace id.
            Err(rejection) => Box::pin(async move {
                let err = match rejection {
                    Some(auth) => {
                        security::session_rejected(auth.reason(), req.path());
                        AppError::from(auth)
                    }
                    None => AppError::internal("AppState not available"),
                };
                let response = err.error_response();
                Ok(req.into_response(response).map_into_right_body())
            }),
        }
    }
}
