use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::domain::{parse_id, AcronymService, UserService};
use crate::errors::AppError;
use crate::render::ViewRenderer;
use shared::{Acronym, AcronymData, User, UserData};

/// Application state: the constructed collaborators every handler needs.
#[derive(Clone)]
pub struct AppState {
    pub acronyms: AcronymService,
    pub users: UserService,
    pub renderer: Arc<dyn ViewRenderer>,
}

impl AppState {
    pub fn new(
        acronyms: AcronymService,
        users: UserService,
        renderer: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            acronyms,
            users,
            renderer,
        }
    }
}

/// Query parameters for the search endpoint
#[derive(Deserialize, Debug)]
pub struct SearchQuery {
    pub term: Option<String>,
}

/// GET /api/acronym
pub async fn list_acronyms(State(state): State<AppState>) -> Result<Json<Vec<Acronym>>, AppError> {
    info!("GET /api/acronym");
    Ok(Json(state.acronyms.list().await?))
}

/// POST /api/acronym
///
/// The body decode is explicit so a malformed payload is always a 400,
/// whatever rejection axum would have produced on its own.
pub async fn create_acronym(
    State(state): State<AppState>,
    payload: Result<Json<AcronymData>, JsonRejection>,
) -> Result<Json<Acronym>, AppError> {
    info!("POST /api/acronym");
    let Json(data) = payload.map_err(|_| AppError::BadRequest("Invalid acronym payload"))?;
    Ok(Json(state.acronyms.create(data).await?))
}

/// GET /api/acronym/:id
pub async fn get_acronym(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Acronym>, AppError> {
    info!("GET /api/acronym/{}", id);
    Ok(Json(state.acronyms.get(parse_id(&id)?).await?))
}

/// PUT /api/acronym/:id
pub async fn update_acronym(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AcronymData>, JsonRejection>,
) -> Result<Json<Acronym>, AppError> {
    info!("PUT /api/acronym/{}", id);
    let id = parse_id(&id)?;
    let Json(data) = payload.map_err(|_| AppError::BadRequest("Invalid acronym payload"))?;
    Ok(Json(state.acronyms.update(id, data).await?))
}

/// DELETE /api/acronym/:id
pub async fn delete_acronym(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /api/acronym/{}", id);
    state.acronyms.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/acronym/search?term=...
pub async fn search_acronyms(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Acronym>>, AppError> {
    info!("GET /api/acronym/search - query: {:?}", query);
    let term = query
        .term
        .ok_or(AppError::BadRequest("Missing search term"))?;
    Ok(Json(state.acronyms.search(term).await?))
}

/// GET /api/acronym/first
pub async fn first_acronym(State(state): State<AppState>) -> Result<Json<Acronym>, AppError> {
    info!("GET /api/acronym/first");
    Ok(Json(state.acronyms.first().await?))
}

/// GET /api/acronym/sorted
pub async fn sorted_acronyms(State(state): State<AppState>) -> Result<Json<Vec<Acronym>>, AppError> {
    info!("GET /api/acronym/sorted");
    Ok(Json(state.acronyms.sorted().await?))
}

/// GET /api/acronym/:id/user
pub async fn acronym_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    info!("GET /api/acronym/{}/user", id);
    Ok(Json(state.acronyms.owner(parse_id(&id)?).await?))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    info!("GET /api/users");
    Ok(Json(state.users.list().await?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<UserData>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    info!("POST /api/users");
    let Json(data) = payload.map_err(|_| AppError::BadRequest("Invalid user payload"))?;
    Ok(Json(state.users.create(data).await?))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    info!("GET /api/users/{}", id);
    Ok(Json(state.users.get(parse_id(&id)?).await?))
}
