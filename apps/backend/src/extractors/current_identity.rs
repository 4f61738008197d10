use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::Claims;
use crate::error::AppError;

/// Identity of the caller, as verified by `RequireSession`.
///
/// Only resolvable on routes mounted under `RequireSession`; anywhere else
/// the claims are absent and extraction fails with 401.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Claims);

impl CurrentIdentity {
    pub fn email(&self) -> &str {
        &self.0.identity.email
    }

    pub fn into_inner(self) -> Claims {
        self.0
    }
}

impl Deref for CurrentIdentity {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        ready(claims.map(CurrentIdentity).ok_or_else(AppError::unauthorized))
    }
}
