use sqlx::PgPool;
use std::sync::Arc;

use crate::config::PricePolicy;
use crate::payment::PaymentGateway;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub payment: Arc<dyn PaymentGateway>,
    pub price_policy: PricePolicy,
}

impl AppState {
    pub fn new(pool: PgPool, payment: Arc<dyn PaymentGateway>, price_policy: PricePolicy) -> Self {
        Self {
            pool,
            payment,
            price_policy,
        }
    }
}
