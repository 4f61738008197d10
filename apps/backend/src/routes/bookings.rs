use actix_web::{web, HttpResponse};

use super::EmailQuery;
use crate::error::AppError;
use crate::extractors::current_identity::CurrentIdentity;
use crate::middleware::require_session::RequireSession;
use crate::state::app_state::AppState;
use crate::store::{Collection, Document, Filter};

const CUSTOMER_FIELD: &str = "userEmail";
const PROVIDER_FIELD: &str = "serviceProviderEmail";

async fn create_booking(
    body: web::Json<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let result = app_state
        .store
        .insert_one(Collection::Bookings, body.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn bookings_where(
    field: &str,
    identity: CurrentIdentity,
    query: web::Query<EmailQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = query.resolve(&identity)?;
    let bookings = app_state
        .store
        .find(Collection::Bookings, &Filter::all().eq(field, email))
        .await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// Bookings the caller made as a customer.
async fn users_bookings(
    identity: CurrentIdentity,
    query: web::Query<EmailQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    bookings_where(CUSTOMER_FIELD, identity, query, app_state).await
}

/// Bookings other users made against the caller's services.
async fn other_users_bookings(
    identity: CurrentIdentity,
    query: web::Query<EmailQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    bookings_where(PROVIDER_FIELD, identity, query, app_state).await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/booking")
            .wrap(RequireSession)
            .route(web::post().to(create_booking)),
    )
    .service(
        web::resource("/usersBooking")
            .wrap(RequireSession)
            .route(web::get().to(users_bookings)),
    )
    .service(
        web::resource("/otherUsersBooking")
            .wrap(RequireSession)
            .route(web::get().to(other_users_bookings)),
    );
}
