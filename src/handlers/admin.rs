//! Back-office concert and venue management. Admin authorization is
//! enforced by the identity layer in front of this service.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::models::concert::ConcertInput;
use crate::models::venue::VenueInput;
use crate::state::AppState;
use crate::store::catalog::CatalogStore;
use crate::utils::error::AppError;
use crate::utils::response::{created, empty_success, success};

/// GET /admin/concerts: every concert, newest first.
pub async fn list_concerts(State(state): State<AppState>) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let concerts = catalog.list_all_concerts().await?;

    Ok(success(concerts, "Concerts loaded").into_response())
}

/// POST /admin/concerts
pub async fn create_concert(
    State(state): State<AppState>,
    Json(input): Json<ConcertInput>,
) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let concert = catalog.create_concert(input).await?;

    Ok(created(concert, "Concert created successfully!").into_response())
}

/// PUT /admin/concerts/:id
pub async fn update_concert(
    State(state): State<AppState>,
    Path(concert_id): Path<Uuid>,
    Json(input): Json<ConcertInput>,
) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let concert = catalog.update_concert(concert_id, input).await?;

    Ok(success(concert, "Concert updated successfully!").into_response())
}

/// DELETE /admin/concerts/:id
pub async fn delete_concert(
    State(state): State<AppState>,
    Path(concert_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    catalog.delete_concert(concert_id).await?;

    Ok(empty_success("Concert deleted successfully!").into_response())
}

/// GET /admin/venues
pub async fn list_venues(State(state): State<AppState>) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let venues = catalog.list_venues().await?;

    Ok(success(venues, "Venues loaded").into_response())
}

/// POST /admin/venues
pub async fn create_venue(
    State(state): State<AppState>,
    Json(input): Json<VenueInput>,
) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let venue = catalog.create_venue(input).await?;

    Ok(created(venue, "Venue created successfully!").into_response())
}

/// PUT /admin/venues/:id
pub async fn update_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<Uuid>,
    Json(input): Json<VenueInput>,
) -> Result<Response, AppError> {
    let catalog = CatalogStore::new(state.pool.clone());
    let venue = catalog.update_venue(venue_id, input).await?;

    Ok(success(venue, "Venue updated successfully!").into_response())
}
