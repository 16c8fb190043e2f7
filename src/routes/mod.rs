use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, create_security_headers_layer};
use crate::handlers::{admin, cart, concerts, health_check, orders};
use crate::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/concerts", get(concerts::list))
        .route("/concerts/genres", get(concerts::genres))
        .route("/concerts/:id", get(concerts::details))
        .route("/cart", get(cart::view))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/:id",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/checkout", post(orders::checkout))
        .route("/orders", get(orders::list))
        .route("/orders/:id", get(orders::details))
        .route("/orders/:id/confirmation", get(orders::confirmation))
        .route("/tickets", get(orders::tickets))
        .route("/tickets/:id", get(orders::ticket_details))
        .route(
            "/admin/concerts",
            get(admin::list_concerts).post(admin::create_concert),
        )
        .route(
            "/admin/concerts/:id",
            put(admin::update_concert).delete(admin::delete_concert),
        )
        .route(
            "/admin/venues",
            get(admin::list_venues).post(admin::create_venue),
        )
        .route("/admin/venues/:id", put(admin::update_venue))
        .layer(create_security_headers_layer())
        .layer(create_cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
