//! API Handlers
//!
//! HTTP request handlers for the user endpoints. Only user creation and
//! the username lookup go through [`UserCacheRepository`]; the remaining
//! handlers talk to the record store directly and leave the cache alone.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    CreateUserRequest, HealthResponse, StatsResponse, UpdateUserRequest, UsernameResponse,
};
use crate::records::{MemoryRecordStore, RecordStore, User, UserId};
use crate::repository::UserCacheRepository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aware user repository
    pub repository: UserCacheRepository,
    /// Authoritative record store
    pub records: Arc<dyn RecordStore>,
    /// Display name cache
    pub cache: SharedCache,
}

impl AppState {
    /// Wires a repository over the given store and cache.
    pub fn new(records: Arc<dyn RecordStore>, cache: SharedCache, name_ttl: Duration) -> Self {
        let repository =
            UserCacheRepository::with_ttl(records.clone(), Arc::new(cache.clone()), name_ttl);
        Self {
            repository,
            records,
            cache,
        }
    }

    /// Creates a new AppState from configuration, backed by in-memory stores.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(MemoryRecordStore::new()),
            SharedCache::default(),
            config.name_ttl(),
        )
    }
}

async fn find_user(state: &AppState, id: UserId) -> Result<User> {
    state
        .records
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {}", id)))
}

/// Handler for GET /api/users
pub async fn list_users_handler(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    Ok(Json(state.records.list().await?))
}

/// Handler for GET /api/users/:id
pub async fn show_user_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    Ok(Json(find_user(&state, id).await?))
}

/// Handler for POST /api/users
///
/// Validates the body, hashes the password and creates the user through
/// the repository, which caches the new name.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let user = state.repository.create(req.into_new_user()?).await?;
    info!(id = user.id, "user created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for PUT /api/users/:id
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::Validation(error_msg));
    }

    let user = state.records.update(id, req.into_changes()).await?;
    Ok(Json(user))
}

/// Handler for DELETE /api/users/:id
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    state.records.delete(id).await?;
    info!(id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/users/:id/username
pub async fn username_handler(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<UsernameResponse>> {
    let name = state.repository.get_username(id).await?;
    Ok(Json(UsernameResponse::new(name)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
