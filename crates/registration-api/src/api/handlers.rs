//! HTTP request handlers.

use super::types::{CreateRegistrationRequest, HealthResponse, UpdateResponse};
use super::AppState;
use crate::error::ApiError;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode},
    Json,
};
use chrono::Utc;
use registration_store::{Registration, RegistrationId, RegistrationPatch};
use tracing::info;

/// Methods served on `/registrations`.
pub const REGISTRATIONS_METHODS: &[Method] = &[Method::GET, Method::POST];

/// Methods served on `/registrations/phone/{phone}`.
pub const PHONE_LOOKUP_METHODS: &[Method] = &[Method::GET];

/// Methods served on `/registrations/{id}`.
pub const REGISTRATION_METHODS: &[Method] = &[Method::PUT];

/// Methods served on `/health`.
pub const HEALTH_METHODS: &[Method] = &[Method::GET];

/// Liveness check. Does not touch the store.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Create a registration.
pub async fn create_registration(
    State(state): State<AppState>,
    body: Result<Json<CreateRegistrationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let Json(request) = body?;
    let new = request.validate()?;

    let registration = state.store.create(new).await?;
    info!(id = %registration.id, slot = %registration.slot, "Registration submitted");

    Ok((StatusCode::CREATED, Json(registration)))
}

/// List active registrations, oldest first.
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let registrations = state.store.list_active().await?;
    Ok(Json(registrations))
}

/// Look up an active registration by phone number.
pub async fn get_registration_by_phone(
    State(state): State<AppState>,
    Path(phone): Path<String>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.store.find_by_phone(&phone).await?;
    Ok(Json(registration))
}

/// Merge the supplied fields into a registration.
///
/// A malformed id cannot resolve to a record and is reported as not found.
pub async fn update_registration(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<RegistrationPatch>, JsonRejection>,
) -> Result<Json<UpdateResponse>, ApiError> {
    let id: RegistrationId = id.parse()?;
    let Json(patch) = body?;

    let updated = state.store.update(&id, patch).await?;
    if updated.cancelled {
        info!(id = %id, "Registration cancelled");
    }

    Ok(Json(UpdateResponse {
        message: "Registration updated successfully".to_string(),
    }))
}

/// Answer for a known path hit with an unsupported method.
pub fn method_not_allowed(method: Method, allowed: &'static [Method]) -> ApiError {
    ApiError::MethodNotAllowed { method, allowed }
}

/// Answer for an unknown path.
pub async fn not_found() -> ApiError {
    ApiError::RouteNotFound
}
