use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const PAYMENT_STATUS_PENDING: &str = "Pending";
pub const PAYMENT_STATUS_COMPLETED: &str = "Completed";
pub const PAYMENT_STATUS_FAILED: &str = "Failed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub user_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub billing_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub total_amount: Decimal,
    pub quantity: i32,
    pub payment_method: String,
    pub payment_status: String,
    pub transaction_id: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
    pub order_date: DateTime<Utc>,
}

/// Billing details collected at checkout. All fields required.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub billing_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub payment_method: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order_id: Uuid,
    pub order_number: String,
    pub payment_status: String,
}

/// Tickets for one concert + tier within an order, grouped for display.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmationItem {
    pub concert_title: String,
    pub artist: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: String,
    pub ticket_type: String,
    pub quantity: i32,
    pub price: Decimal,
    pub ticket_numbers: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub order_number: String,
    pub total_amount: Decimal,
    pub order_date: DateTime<Utc>,
    pub payment_status: String,
    pub items: Vec<ConfirmationItem>,
}
