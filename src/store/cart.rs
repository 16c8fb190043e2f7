//! Per-user cart persistence: one cart per user, lines keyed by
//! (concert, ticket type) with a price snapshot taken at add time.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::cart::{
    AddToCartRequest, Cart, CartItem, CartLine, CartSummary, CartTotals,
};
use crate::pricing;
use crate::utils::error::AppError;

pub const MIN_LINE_QUANTITY: i32 = 1;
pub const MAX_LINE_QUANTITY: i32 = 10;

#[derive(Clone)]
pub struct CartStore {
    pool: PgPool,
}

impl CartStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the user's cart, creating an empty one on first access.
    /// Safe to call repeatedly; the unique constraint on `user_id` makes
    /// the lazy insert idempotent.
    pub async fn get_or_create(&self, user_id: Uuid) -> Result<Cart, AppError> {
        if let Some(cart) = sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
        {
            return Ok(cart);
        }

        sqlx::query(
            "INSERT INTO carts (id, user_id, created_at) VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let cart = sqlx::query_as::<_, Cart>("SELECT * FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(cart)
    }

    /// Add tickets to the cart. An existing (concert, ticket type) line has
    /// its quantity summed and its price snapshot refreshed from the
    /// concert's current base price.
    pub async fn add_item(
        &self,
        user_id: Uuid,
        request: AddToCartRequest,
    ) -> Result<CartItem, AppError> {
        validate_quantity(request.quantity)?;

        let concert = sqlx::query_as::<_, (Decimal, i32, bool)>(
            "SELECT base_price, available_tickets, is_active FROM concerts WHERE id = $1",
        )
        .bind(request.concert_id)
        .fetch_optional(&self.pool)
        .await?;

        let (base_price, available_tickets, is_active) = concert.ok_or_else(|| {
            AppError::NotFound(format!("Concert {} was not found", request.concert_id))
        })?;

        if !is_active {
            return Err(AppError::NotFound(format!(
                "Concert {} is no longer on sale",
                request.concert_id
            )));
        }

        if available_tickets < request.quantity {
            return Err(AppError::InsufficientInventory(format!(
                "Only {} tickets available",
                available_tickets
            )));
        }

        let cart = self.get_or_create(user_id).await?;
        let price_per_ticket = pricing::ticket_price(base_price, request.ticket_type);

        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items
                (id, cart_id, concert_id, quantity, ticket_type, price_per_ticket, added_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT ON CONSTRAINT uq_cart_line
            DO UPDATE SET quantity = cart_items.quantity + EXCLUDED.quantity,
                          price_per_ticket = EXCLUDED.price_per_ticket
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(cart.id)
        .bind(request.concert_id)
        .bind(request.quantity)
        .bind(request.ticket_type.as_str())
        .bind(price_per_ticket)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        self.touch(cart.id).await?;

        tracing::info!(
            user_id = %user_id,
            concert_id = %request.concert_id,
            ticket_type = request.ticket_type.as_str(),
            quantity = request.quantity,
            "Added tickets to cart"
        );

        Ok(item)
    }

    /// Change a line's quantity, checked against the concert's live
    /// availability rather than the snapshot taken at add time.
    pub async fn update_quantity(
        &self,
        user_id: Uuid,
        cart_item_id: Uuid,
        quantity: i32,
    ) -> Result<CartTotals, AppError> {
        validate_quantity(quantity)?;

        let row = sqlx::query_as::<_, (Uuid, Decimal, i32)>(
            r#"
            SELECT ci.cart_id, ci.price_per_ticket, co.available_tickets
            FROM cart_items ci
            JOIN carts ca ON ca.id = ci.cart_id
            JOIN concerts co ON co.id = ci.concert_id
            WHERE ci.id = $1 AND ca.user_id = $2
            "#,
        )
        .bind(cart_item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let (cart_id, price_per_ticket, available_tickets) =
            row.ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

        if available_tickets < quantity {
            return Err(AppError::InsufficientInventory(format!(
                "Only {} tickets available",
                available_tickets
            )));
        }

        sqlx::query("UPDATE cart_items SET quantity = $2 WHERE id = $1")
            .bind(cart_item_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;

        self.touch(cart_id).await?;

        let lines = self.lines(cart_id).await?;
        let total_amount = lines.iter().map(CartLine::subtotal).sum();

        Ok(CartTotals {
            subtotal: price_per_ticket * Decimal::from(quantity),
            total_amount,
        })
    }

    pub async fn remove_item(&self, user_id: Uuid, cart_item_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM cart_items ci
            USING carts ca
            WHERE ci.id = $1 AND ci.cart_id = ca.id AND ca.user_id = $2
            "#,
        )
        .bind(cart_item_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cart item not found".to_string()));
        }

        tracing::info!(user_id = %user_id, cart_item_id = %cart_item_id, "Removed cart item");
        Ok(())
    }

    pub async fn summary(&self, user_id: Uuid) -> Result<CartSummary, AppError> {
        let cart = self.get_or_create(user_id).await?;
        let lines = self.lines(cart.id).await?;
        Ok(CartSummary::from_lines(lines))
    }

    async fn lines(&self, cart_id: Uuid) -> Result<Vec<CartLine>, AppError> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT ci.id AS cart_item_id, ci.concert_id, co.title AS concert_title,
                   co.artist, co.event_date, v.name AS venue_name, ci.ticket_type,
                   ci.quantity, ci.price_per_ticket, co.image_url
            FROM cart_items ci
            JOIN concerts co ON co.id = ci.concert_id
            JOIN venues v ON v.id = co.venue_id
            WHERE ci.cart_id = $1
            ORDER BY ci.added_at
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    async fn touch(&self, cart_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE carts SET updated_at = $2 WHERE id = $1")
            .bind(cart_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if !(MIN_LINE_QUANTITY..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(AppError::ValidationError(format!(
            "Quantity must be between {} and {}",
            MIN_LINE_QUANTITY, MAX_LINE_QUANTITY
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_bounds_are_inclusive() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(10).is_ok());
    }

    #[test]
    fn out_of_range_quantities_are_rejected() {
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(11).is_err());
        assert!(validate_quantity(-3).is_err());
    }
}
