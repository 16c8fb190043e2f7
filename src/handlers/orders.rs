use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::checkout::CheckoutOrchestrator;
use crate::models::order::CheckoutRequest;
use crate::state::AppState;
use crate::store::orders::OrderStore;
use crate::utils::error::AppError;
use crate::utils::extract::AuthUser;
use crate::utils::response::success;

/// POST /checkout: turn the caller's cart into an order with tickets.
pub async fn checkout(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<Response, AppError> {
    let orchestrator = CheckoutOrchestrator::new(
        state.pool.clone(),
        state.payment.clone(),
        state.price_policy,
    );
    let response = orchestrator.checkout(user_id, request).await?;

    Ok(success(response, "Order placed successfully!").into_response())
}

/// GET /orders: the caller's order history.
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Response, AppError> {
    let store = OrderStore::new(state.pool.clone());
    let orders = store.list_orders(user_id).await?;

    Ok(success(orders, "Orders loaded").into_response())
}

/// GET /orders/:id
pub async fn details(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(order_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let store = OrderStore::new(state.pool.clone());
    let order = store.get_order(user_id, order_id).await?;

    Ok(success(order, "Order loaded").into_response())
}

/// GET /orders/:id/confirmation: tickets grouped by concert and tier.
pub async fn confirmation(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(order_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let store = OrderStore::new(state.pool.clone());
    let confirmation = store.confirmation(user_id, order_id).await?;

    Ok(success(confirmation, "Order confirmation loaded").into_response())
}

/// GET /tickets: every ticket the caller has purchased.
pub async fn tickets(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Response, AppError> {
    let store = OrderStore::new(state.pool.clone());
    let tickets = store.list_tickets(user_id).await?;

    Ok(success(tickets, "Tickets loaded").into_response())
}

/// GET /tickets/:id
pub async fn ticket_details(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(ticket_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let store = OrderStore::new(state.pool.clone());
    let ticket = store.get_ticket(user_id, ticket_id).await?;

    Ok(success(ticket, "Ticket loaded").into_response())
}
