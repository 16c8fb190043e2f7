use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;
use crate::store::catalog::CatalogStore;
use crate::utils::error::AppError;
use crate::utils::response::success;

#[derive(Debug, Deserialize)]
pub struct ConcertFilter {
    pub genre: Option<String>,
    pub search: Option<String>,
}

/// GET /concerts: active concerts, optionally filtered by genre and a
/// title/artist search.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ConcertFilter>,
) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let concerts = catalog
        .list_concerts(filter.genre.as_deref(), filter.search.as_deref())
        .await?;

    Ok(success(concerts, "Concerts loaded").into_response())
}

/// GET /concerts/genres: distinct genres for the filter dropdown.
pub async fn genres(State(state): State<AppState>) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let genres = catalog.list_genres().await?;

    Ok(success(genres, "Genres loaded").into_response())
}

/// GET /concerts/:id: one concert with venue and availability.
pub async fn details(
    State(state): State<AppState>,
    Path(concert_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let details = catalog.get_details(concert_id).await?;

    Ok(success(details, "Concert loaded").into_response())
}
