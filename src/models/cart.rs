use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ticket::TicketType;

/// One cart per user, created lazily on first access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub concert_id: Uuid,
    pub quantity: i32,
    pub ticket_type: String,
    pub price_per_ticket: Decimal,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddToCartRequest {
    pub concert_id: Uuid,
    pub ticket_type: TicketType,
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// One cart line joined with its concert and venue, ready for display.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartLine {
    pub cart_item_id: Uuid,
    pub concert_id: Uuid,
    pub concert_title: String,
    pub artist: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: String,
    pub ticket_type: String,
    pub quantity: i32,
    pub price_per_ticket: Decimal,
    pub image_url: Option<String>,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.price_per_ticket * Decimal::from(self.quantity)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    pub subtotal: Decimal,
}

/// Returned after a quantity change so the client can repaint totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub total_items: i32,
    pub total_amount: Decimal,
    pub items: Vec<CartLineView>,
}

impl CartSummary {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let total_items = lines.iter().map(|l| l.quantity).sum();
        let total_amount = lines.iter().map(CartLine::subtotal).sum();
        let items = lines
            .into_iter()
            .map(|line| {
                let subtotal = line.subtotal();
                CartLineView { line, subtotal }
            })
            .collect();

        Self {
            total_items,
            total_amount,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i32, price: Decimal) -> CartLine {
        CartLine {
            cart_item_id: Uuid::new_v4(),
            concert_id: Uuid::new_v4(),
            concert_title: "Evening Echoes".to_string(),
            artist: "The Lanterns".to_string(),
            event_date: Utc::now(),
            venue_name: "Riverside Hall".to_string(),
            ticket_type: "General".to_string(),
            quantity,
            price_per_ticket: price,
            image_url: None,
        }
    }

    #[test]
    fn summary_totals_sum_line_subtotals() {
        let summary = CartSummary::from_lines(vec![
            line(2, Decimal::new(8900, 2)),
            line(1, Decimal::new(17800, 2)),
        ]);

        assert_eq!(summary.total_items, 3);
        assert_eq!(summary.total_amount, Decimal::new(35600, 2));
        assert_eq!(summary.items[0].subtotal, Decimal::new(17800, 2));
    }

    #[test]
    fn empty_cart_sums_to_zero() {
        let summary = CartSummary::from_lines(Vec::new());
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert!(summary.items.is_empty());
    }
}
