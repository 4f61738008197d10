//! Request logger.
//!
//! Records method and path as soon as a request arrives, then its outcome.
//! Never rejects and never touches the request or response.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::request_trace::TraceId;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// What gets logged about one request.
struct RequestLine {
    method: String,
    path: String,
    trace_id: String,
    started: Instant,
}

impl RequestLine {
    fn of(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            trace_id: req
                .extensions()
                .get::<TraceId>()
                .map(|id| id.0.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            started: Instant::now(),
        }
    }

    fn received(&self) {
        info!(
            http.method = %self.method,
            url.path = %self.path,
            trace_id = %self.trace_id,
            "request_received"
        );
    }

    fn completed(&self, status: StatusCode) {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        let status = status.as_u16();
        let (method, path, trace_id) = (&self.method, &self.path, &self.trace_id);

        match status {
            500.. => error!(http.method = %method, url.path = %path, http.status_code = status, duration_ms, trace_id = %trace_id, "request_completed"),
            400..=499 => warn!(http.method = %method, url.path = %path, http.status_code = status, duration_ms, trace_id = %trace_id, "request_completed"),
            _ => info!(http.method = %method, url.path = %path, http.status_code = status, duration_ms, trace_id = %trace_id, "request_completed"),
        }
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let line = RequestLine::of(&req);
        line.received();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            line.completed(status);
            result
        })
    }
}
