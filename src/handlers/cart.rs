use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::models::cart::{AddToCartRequest, UpdateCartItemRequest};
use crate::state::AppState;
use crate::store::cart::CartStore;
use crate::utils::error::AppError;
use crate::utils::extract::AuthUser;
use crate::utils::response::{empty_success, success};

/// GET /cart: the caller's cart with per-line subtotals and totals.
pub async fn view(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Response, AppError> {
    let store = CartStore::new(state.pool.clone());
    let summary = store.summary(user_id).await?;

    Ok(success(summary, "Cart loaded").into_response())
}

/// POST /cart/items: add tickets for a concert and tier.
pub async fn add_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<AddToCartRequest>,
) -> Result<Response, AppError> {
    let quantity = request.quantity;
    let store = CartStore::new(state.pool.clone());
    let item = store.add_item(user_id, request).await?;

    Ok(success(item, format!("{} ticket(s) added to cart", quantity)).into_response())
}

/// PUT /cart/items/:id: change a line's quantity.
pub async fn update_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(cart_item_id): Path<Uuid>,
    Json(request): Json<UpdateCartItemRequest>,
) -> Result<Response, AppError> {
    let store = CartStore::new(state.pool.clone());
    let totals = store
        .update_quantity(user_id, cart_item_id, request.quantity)
        .await?;

    Ok(success(totals, "Cart updated").into_response())
}

/// DELETE /cart/items/:id
pub async fn remove_item(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(cart_item_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let store = CartStore::new(state.pool.clone());
    store.remove_item(user_id, cart_item_id).await?;

    Ok(empty_success("Item removed from cart").into_response())
}
