use actix_web::{web, HttpResponse};
use tracing::info;

use super::EmailQuery;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_identity::CurrentIdentity;
use crate::logging::pii::Redacted;
use crate::middleware::require_session::RequireSession;
use crate::state::app_state::AppState;
use crate::store::{Collection, Document, Filter};

/// Fields a service update may touch.
pub const EDITABLE_FIELDS: &[&str] = &[
    "serviceImage",
    "serviceName",
    "price",
    "description",
    "serviceArea",
];

const PROVIDER_FIELD: &str = "serviceProviderEmail";

async fn list_services(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let services = app_state
        .store
        .find(Collection::Services, &Filter::all())
        .await?;
    Ok(HttpResponse::Ok().json(services))
}

async fn get_service(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let service = app_state
        .store
        .find_one(Collection::Services, &Filter::by_id(id.as_str()))
        .await?
        .ok_or_else(|| {
            AppError::not_found(ErrorCode::ServiceNotFound, format!("service {id} not found"))
        })?;
    Ok(HttpResponse::Ok().json(service))
}

async fn create_service(
    identity: CurrentIdentity,
    body: web::Json<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .store
        .insert_one(Collection::Services, body.into_inner())
        .await?;
    info!(
        id = %result.inserted_id,
        by = %Redacted(identity.email()),
        "service created"
    );
    Ok(HttpResponse::Ok().json(result))
}

async fn update_service(
    path: web::Path<String>,
    body: web::Json<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let set: Document = body
        .into_inner()
        .into_iter()
        .filter(|(field, _)| EDITABLE_FIELDS.contains(&field.as_str()))
        .collect();

    let result = app_state
        .store
        .update_one(Collection::Services, &Filter::by_id(id), set, true)
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn delete_service(
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .store
        .delete_one(Collection::Services, &Filter::by_id(path.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn users_services(
    identity: CurrentIdentity,
    query: web::Query<EmailQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = query.resolve(&identity)?;
    let services = app_state
        .store
        .find(Collection::Services, &Filter::all().eq(PROVIDER_FIELD, email))
        .await?;
    Ok(HttpResponse::Ok().json(services))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/services", web::get().to(list_services))
        .route("/services/{id}", web::get().to(get_service))
        .service(
            web::resource("/service")
                .wrap(RequireSession)
                .route(web::post().to(create_service)),
        )
        .service(
            web::resource("/service/{id}")
                .wrap(RequireSession)
                .route(web::put().to(update_service))
                .route(web::delete().to(delete_service)),
        )
        .service(
            web::resource("/usersService")
                .wrap(RequireSession)
                .route(web::get().to(users_services)),
        );
}
