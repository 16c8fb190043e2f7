//! Order and ticket reads, including the confirmation view that groups an
//! order's tickets by concert and tier.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::order::{ConfirmationItem, Order, OrderConfirmation};
use crate::models::ticket::TicketView;
use crate::utils::error::AppError;

/// One ticket row joined with concert and venue, the unit the
/// confirmation formatter groups over.
#[derive(Debug, Clone, FromRow)]
pub struct ConfirmationRow {
    pub concert_id: Uuid,
    pub concert_title: String,
    pub artist: String,
    pub event_date: DateTime<Utc>,
    pub venue_name: String,
    pub ticket_type: String,
    pub price: Decimal,
    pub ticket_number: String,
}

#[derive(Clone)]
pub struct OrderStore {
    pool: PgPool,
}

impl OrderStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The caller's orders, newest first.
    pub async fn list_orders(&self, user_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT * FROM orders WHERE user_id = $1 ORDER BY order_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Load an order, enforcing ownership. Orders the caller does not own
    /// are indistinguishable from absent ones.
    pub async fn get_order(&self, user_id: Uuid, order_id: Uuid) -> Result<Order, AppError> {
        sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND user_id = $2")
            .bind(order_id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} was not found", order_id)))
    }

    /// Confirmation view: the order header plus its tickets grouped by
    /// concert and ticket type.
    pub async fn confirmation(
        &self,
        user_id: Uuid,
        order_id: Uuid,
    ) -> Result<OrderConfirmation, AppError> {
        let order = self.get_order(user_id, order_id).await?;

        let rows = sqlx::query_as::<_, ConfirmationRow>(
            r#"
            SELECT t.concert_id, c.title AS concert_title, c.artist, c.event_date,
                   v.name AS venue_name, t.ticket_type, t.price, t.ticket_number
            FROM tickets t
            JOIN concerts c ON c.id = t.concert_id
            JOIN venues v ON v.id = c.venue_id
            WHERE t.order_id = $1
            ORDER BY t.ticket_number
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(OrderConfirmation {
            order_number: order.order_number,
            total_amount: order.total_amount,
            order_date: order.order_date,
            payment_status: order.payment_status,
            items: group_confirmation_items(rows),
        })
    }

    /// Every ticket the caller has purchased, newest first.
    pub async fn list_tickets(&self, user_id: Uuid) -> Result<Vec<TicketView>, AppError> {
        let tickets = sqlx::query_as::<_, TicketView>(
            r#"
            SELECT t.id, t.ticket_number, t.ticket_type, t.price, t.status,
                   t.qr_code, t.purchased_at, c.title AS concert_title, c.artist,
                   c.event_date, v.name AS venue_name, o.order_number
            FROM tickets t
            JOIN orders o ON o.id = t.order_id
            JOIN concerts c ON c.id = t.concert_id
            JOIN venues v ON v.id = c.venue_id
            WHERE o.user_id = $1
            ORDER BY t.purchased_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    pub async fn get_ticket(&self, user_id: Uuid, ticket_id: Uuid) -> Result<TicketView, AppError> {
        sqlx::query_as::<_, TicketView>(
            r#"
            SELECT t.id, t.ticket_number, t.ticket_type, t.price, t.status,
                   t.qr_code, t.purchased_at, c.title AS concert_title, c.artist,
                   c.event_date, v.name AS venue_name, o.order_number
            FROM tickets t
            JOIN orders o ON o.id = t.order_id
            JOIN concerts c ON c.id = t.concert_id
            JOIN venues v ON v.id = c.venue_id
            WHERE t.id = $1 AND o.user_id = $2
            "#,
        )
        .bind(ticket_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Ticket {} was not found", ticket_id)))
    }
}

/// Group ticket rows by (concert, ticket type), preserving first-seen order.
/// Each group carries the ticket count, summed price and the ticket numbers.
pub fn group_confirmation_items(rows: Vec<ConfirmationRow>) -> Vec<ConfirmationItem> {
    let mut items: Vec<ConfirmationItem> = Vec::new();
    let mut keys: Vec<(Uuid, String)> = Vec::new();

    for row in rows {
        let key = (row.concert_id, row.ticket_type.clone());
        match keys.iter().position(|k| *k == key) {
            Some(idx) => {
                let item = &mut items[idx];
                item.quantity += 1;
                item.price += row.price;
                item.ticket_numbers.push(row.ticket_number);
            }
            None => {
                keys.push(key);
                items.push(ConfirmationItem {
                    concert_title: row.concert_title,
                    artist: row.artist,
                    event_date: row.event_date,
                    venue_name: row.venue_name,
                    ticket_type: row.ticket_type,
                    quantity: 1,
                    price: row.price,
                    ticket_numbers: vec![row.ticket_number],
                });
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(concert_id: Uuid, ticket_type: &str, price: Decimal, number: &str) -> ConfirmationRow {
        ConfirmationRow {
            concert_id,
            concert_title: "Evening Echoes".to_string(),
            artist: "The Lanterns".to_string(),
            event_date: Utc::now(),
            venue_name: "Riverside Hall".to_string(),
            ticket_type: ticket_type.to_string(),
            price,
            ticket_number: number.to_string(),
        }
    }

    #[test]
    fn groups_by_concert_and_tier() {
        let concert = Uuid::new_v4();
        let general = Decimal::new(8900, 2);
        let vip = Decimal::new(17800, 2);

        let items = group_confirmation_items(vec![
            row(concert, "General", general, "TKT-A"),
            row(concert, "General", general, "TKT-B"),
            row(concert, "VIP", vip, "TKT-C"),
        ]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].price, Decimal::new(17800, 2));
        assert_eq!(items[0].ticket_numbers, vec!["TKT-A", "TKT-B"]);
        assert_eq!(items[1].quantity, 1);
        assert_eq!(items[1].ticket_type, "VIP");
    }

    #[test]
    fn regrouped_prices_reproduce_the_order_total() {
        let concert_a = Uuid::new_v4();
        let concert_b = Uuid::new_v4();
        let rows = vec![
            row(concert_a, "General", Decimal::new(8900, 2), "TKT-1"),
            row(concert_a, "General", Decimal::new(8900, 2), "TKT-2"),
            row(concert_a, "VIP", Decimal::new(17800, 2), "TKT-3"),
            row(concert_b, "VVIP", Decimal::new(31150, 2), "TKT-4"),
        ];
        let order_total: Decimal = rows.iter().map(|r| r.price).sum();

        let items = group_confirmation_items(rows);
        let regrouped: Decimal = items.iter().map(|i| i.price).sum();

        assert_eq!(regrouped, order_total);
    }

    #[test]
    fn empty_order_yields_no_groups() {
        assert!(group_confirmation_items(Vec::new()).is_empty());
    }
}
