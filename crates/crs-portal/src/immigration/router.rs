use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{FileCategory, OwnerId};
use super::repository::{ImmigrationFileRepository, RepositoryError};
use super::service::{CrsScoreService, CrsServiceError};
use crate::scoring::ApplicantProfile;

/// Header carrying the authenticated user id, injected by the upstream auth gateway.
pub const OWNER_HEADER: &str = "x-user-id";

#[derive(Debug, Deserialize)]
pub(crate) struct OpenFileRequest {
    pub(crate) category: FileCategory,
}

/// Router builder exposing the CRS endpoints.
pub fn crs_router<R>(service: Arc<CrsScoreService<R>>) -> Router
where
    R: ImmigrationFileRepository + 'static,
{
    Router::new()
        .route(
            "/api/crs",
            get(current_handler::<R>)
                .post(calculate_handler::<R>)
                .put(recalculate_handler::<R>),
        )
        .route("/api/crs/preview", post(preview_handler::<R>))
        .route("/api/immigration-files", post(open_file_handler::<R>))
        .with_state(service)
}

pub(crate) async fn current_handler<R>(
    State(service): State<Arc<CrsScoreService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: ImmigrationFileRepository + 'static,
{
    let Some(owner) = owner_from_headers(&headers) else {
        return unauthorized();
    };
    match service.current(&owner) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn calculate_handler<R>(
    State(service): State<Arc<CrsScoreService<R>>>,
    headers: HeaderMap,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Response
where
    R: ImmigrationFileRepository + 'static,
{
    let Some(owner) = owner_from_headers(&headers) else {
        return unauthorized();
    };
    match service.calculate(&owner, profile) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn recalculate_handler<R>(
    State(service): State<Arc<CrsScoreService<R>>>,
    headers: HeaderMap,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Response
where
    R: ImmigrationFileRepository + 'static,
{
    let Some(owner) = owner_from_headers(&headers) else {
        return unauthorized();
    };
    match service.recalculate(&owner, profile) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<CrsScoreService<R>>>,
    axum::Json(profile): axum::Json<ApplicantProfile>,
) -> Response
where
    R: ImmigrationFileRepository + 'static,
{
    (StatusCode::OK, axum::Json(service.preview(&profile))).into_response()
}

pub(crate) async fn open_file_handler<R>(
    State(service): State<Arc<CrsScoreService<R>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<OpenFileRequest>,
) -> Response
where
    R: ImmigrationFileRepository + 'static,
{
    let Some(owner) = owner_from_headers(&headers) else {
        return unauthorized();
    };
    match service.open_file(owner, request.category) {
        Ok(file) => (StatusCode::CREATED, axum::Json(file.summary_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) fn owner_from_headers(headers: &HeaderMap) -> Option<OwnerId> {
    headers
        .get(OWNER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| OwnerId(value.to_string()))
}

fn unauthorized() -> Response {
    let payload = json!({
        "error": "not authorized, no user identity provided",
    });
    (StatusCode::UNAUTHORIZED, axum::Json(payload)).into_response()
}

fn error_response(err: CrsServiceError) -> Response {
    let status = match &err {
        CrsServiceError::MissingRequiredFields => StatusCode::BAD_REQUEST,
        CrsServiceError::NoActiveFile => StatusCode::NOT_FOUND,
        CrsServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        CrsServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CrsServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
