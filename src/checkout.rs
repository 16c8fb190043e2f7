//! Checkout orchestration: validate the cart against live inventory, write
//! the order/ticket graph and clear the cart in one transaction, then
//! settle payment through the gateway.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::PricePolicy;
use crate::models::order::{CheckoutRequest, CheckoutResponse, PAYMENT_STATUS_COMPLETED};
use crate::payment::PaymentGateway;
use crate::pricing;
use crate::utils::error::AppError;

const ORDER_NUMBER_PREFIX: &str = "CNX";
const TICKET_NUMBER_PREFIX: &str = "TKT";

/// Cart line joined with the concert's current base price, as loaded
/// inside the checkout transaction.
#[derive(Debug, Clone, FromRow)]
struct CheckoutLine {
    concert_id: Uuid,
    quantity: i32,
    ticket_type: String,
    price_per_ticket: Decimal,
    base_price: Decimal,
}

pub struct CheckoutOrchestrator {
    pool: PgPool,
    payment: Arc<dyn PaymentGateway>,
    price_policy: PricePolicy,
}

impl CheckoutOrchestrator {
    pub fn new(pool: PgPool, payment: Arc<dyn PaymentGateway>, price_policy: PricePolicy) -> Self {
        Self {
            pool,
            payment,
            price_policy,
        }
    }

    /// Run a full checkout for the user's cart.
    ///
    /// The order, its tickets, the inventory decrements and the cart clear
    /// commit atomically; a failed inventory claim rolls everything back.
    /// Payment runs after the commit; if the gateway declines, the order
    /// stays `Pending` and the caller sees `PaymentFailed`.
    pub async fn checkout(
        &self,
        user_id: Uuid,
        request: CheckoutRequest,
    ) -> Result<CheckoutResponse, AppError> {
        validate_checkout_request(&request)?;

        let mut txn = self.pool.begin().await?;

        let cart_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM carts WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&mut *txn)
            .await?
            .ok_or(AppError::EmptyCart)?;

        let lines = sqlx::query_as::<_, CheckoutLine>(
            r#"
            SELECT ci.concert_id, ci.quantity, ci.ticket_type,
                   ci.price_per_ticket, co.base_price
            FROM cart_items ci
            JOIN concerts co ON co.id = ci.concert_id
            WHERE ci.cart_id = $1
            ORDER BY ci.added_at
            "#,
        )
        .bind(cart_id)
        .fetch_all(&mut *txn)
        .await?;

        if lines.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let mut charged: Vec<(CheckoutLine, Decimal)> = Vec::with_capacity(lines.len());
        for line in lines {
            let unit_price = charged_unit_price(
                self.price_policy,
                line.price_per_ticket,
                line.base_price,
                &line.ticket_type,
            )?;
            charged.push((line, unit_price));
        }

        let total_amount: Decimal = charged
            .iter()
            .map(|(line, price)| *price * Decimal::from(line.quantity))
            .sum();
        let total_quantity: i32 = charged.iter().map(|(line, _)| line.quantity).sum();

        let order_id = Uuid::new_v4();
        let order_number = generate_order_number();
        let order_date = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO orders
                (id, order_number, user_id, customer_name, customer_email,
                 customer_phone, billing_address, city, state, postal_code,
                 total_amount, quantity, payment_method, payment_status, order_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, 'Pending', $14)
            "#,
        )
        .bind(order_id)
        .bind(&order_number)
        .bind(user_id)
        .bind(&request.customer_name)
        .bind(&request.customer_email)
        .bind(&request.customer_phone)
        .bind(&request.billing_address)
        .bind(&request.city)
        .bind(&request.state)
        .bind(&request.postal_code)
        .bind(total_amount)
        .bind(total_quantity)
        .bind(&request.payment_method)
        .bind(order_date)
        .execute(&mut *txn)
        .await?;

        // Sequence index runs across the whole order so each ticket's QR
        // payload is distinct.
        let mut sequence = 0;
        for (line, unit_price) in &charged {
            // Conditional decrement: a concurrent checkout that drained this
            // concert first makes this touch zero rows, and the whole
            // transaction rolls back.
            let claimed = sqlx::query(
                r#"
                UPDATE concerts
                SET available_tickets = available_tickets - $2, updated_at = $3
                WHERE id = $1 AND available_tickets >= $2
                "#,
            )
            .bind(line.concert_id)
            .bind(line.quantity)
            .bind(order_date)
            .execute(&mut *txn)
            .await?
            .rows_affected();

            if claimed == 0 {
                return Err(AppError::InsufficientInventory(format!(
                    "Concert {} no longer has {} tickets available",
                    line.concert_id, line.quantity
                )));
            }

            for _ in 0..line.quantity {
                sequence += 1;
                sqlx::query(
                    r#"
                    INSERT INTO tickets
                        (id, ticket_number, concert_id, order_id, ticket_type,
                         price, status, qr_code, purchased_at)
                    VALUES ($1, $2, $3, $4, $5, $6, 'Sold', $7, $8)
                    "#,
                )
                .bind(Uuid::new_v4())
                .bind(generate_ticket_number())
                .bind(line.concert_id)
                .bind(order_id)
                .bind(&line.ticket_type)
                .bind(*unit_price)
                .bind(qr_payload(&order_number, sequence))
                .bind(order_date)
                .execute(&mut *txn)
                .await?;
            }
        }

        sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&mut *txn)
            .await?;
        sqlx::query("UPDATE carts SET updated_at = $2 WHERE id = $1")
            .bind(cart_id)
            .bind(order_date)
            .execute(&mut *txn)
            .await?;

        txn.commit().await?;

        tracing::info!(
            order_number = %order_number,
            user_id = %user_id,
            %total_amount,
            tickets = total_quantity,
            "Order placed"
        );

        let receipt = match self
            .payment
            .process(&order_number, total_amount, &request.payment_method)
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                // Order stays Pending for reconciliation or retry.
                tracing::warn!(order_number = %order_number, error = %e, "Payment declined");
                return Err(AppError::PaymentFailed(format!(
                    "Payment failed; order {} was recorded and remains pending",
                    order_number
                )));
            }
        };

        sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = 'Completed', transaction_id = $2, payment_date = $3
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .bind(&receipt.transaction_id)
        .bind(receipt.settled_at)
        .execute(&self.pool)
        .await?;

        Ok(CheckoutResponse {
            order_id,
            order_number,
            payment_status: PAYMENT_STATUS_COMPLETED.to_string(),
        })
    }
}

/// The unit price a checkout line is charged at. Snapshot policy charges
/// the price captured when the line entered the cart; revalidate recomputes
/// from the concert's current base price.
fn charged_unit_price(
    policy: PricePolicy,
    snapshot: Decimal,
    base_price: Decimal,
    ticket_type: &str,
) -> Result<Decimal, AppError> {
    match policy {
        PricePolicy::Snapshot => Ok(snapshot),
        PricePolicy::Revalidate => {
            let tier = ticket_type
                .parse()
                .map_err(|e: String| AppError::Unexpected(e))?;
            Ok(pricing::ticket_price(base_price, tier))
        }
    }
}

fn validate_checkout_request(request: &CheckoutRequest) -> Result<(), AppError> {
    for (value, field) in [
        (&request.customer_name, "Customer name"),
        (&request.customer_email, "Customer email"),
        (&request.customer_phone, "Customer phone"),
        (&request.billing_address, "Billing address"),
        (&request.city, "City"),
        (&request.state, "State"),
        (&request.postal_code, "Postal code"),
        (&request.payment_method, "Payment method"),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!("{} is required", field)));
        }
    }

    if !request.customer_email.contains('@') {
        return Err(AppError::ValidationError(
            "Customer email is not a valid email address".to_string(),
        ));
    }

    if request.postal_code.len() != 5 || !request.postal_code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::ValidationError(
            "Postal code must be 5 digits".to_string(),
        ));
    }

    Ok(())
}

fn generate_order_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}{}",
        ORDER_NUMBER_PREFIX,
        Utc::now().format("%Y%m%d%H%M%S"),
        &suffix[..4].to_uppercase()
    )
}

fn generate_ticket_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}{}{}",
        TICKET_NUMBER_PREFIX,
        Utc::now().format("%Y%m%d"),
        &suffix[..8].to_uppercase()
    )
}

fn qr_payload(order_number: &str, sequence: i32) -> String {
    format!("QR-{}-{:03}", order_number, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            customer_name: "Aina Zulkifli".to_string(),
            customer_email: "aina@example.com".to_string(),
            customer_phone: "+60123456789".to_string(),
            billing_address: "12 Jalan Ampang".to_string(),
            city: "Kuala Lumpur".to_string(),
            state: "Wilayah Persekutuan Kuala Lumpur".to_string(),
            postal_code: "50450".to_string(),
            payment_method: "FPX".to_string(),
        }
    }

    #[test]
    fn complete_request_validates() {
        assert!(validate_checkout_request(&request()).is_ok());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut req = request();
        req.city = "   ".to_string();
        assert!(matches!(
            validate_checkout_request(&req),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn postal_code_must_be_five_digits() {
        let mut req = request();
        req.postal_code = "5045".to_string();
        assert!(validate_checkout_request(&req).is_err());

        req.postal_code = "5045A".to_string();
        assert!(validate_checkout_request(&req).is_err());
    }

    #[test]
    fn email_must_contain_at_sign() {
        let mut req = request();
        req.customer_email = "aina.example.com".to_string();
        assert!(validate_checkout_request(&req).is_err());
    }

    #[test]
    fn order_numbers_carry_prefix_timestamp_and_suffix() {
        let number = generate_order_number();
        assert!(number.starts_with(ORDER_NUMBER_PREFIX));
        assert_eq!(number.len(), 3 + 14 + 4);
    }

    #[test]
    fn ticket_numbers_carry_prefix_date_and_suffix() {
        let number = generate_ticket_number();
        assert!(number.starts_with(TICKET_NUMBER_PREFIX));
        assert_eq!(number.len(), 3 + 8 + 8);
    }

    #[test]
    fn qr_payload_encodes_order_and_sequence() {
        assert_eq!(
            qr_payload("CNX20250101000000ABCD", 7),
            "QR-CNX20250101000000ABCD-007"
        );
    }

    #[test]
    fn snapshot_policy_charges_the_stored_price() {
        let price = charged_unit_price(
            PricePolicy::Snapshot,
            Decimal::new(8900, 2),
            Decimal::new(12000, 2),
            "General",
        )
        .expect("snapshot never parses the tier");
        assert_eq!(price, Decimal::new(8900, 2));
    }

    #[test]
    fn revalidate_policy_recomputes_from_base_price() {
        let price = charged_unit_price(
            PricePolicy::Revalidate,
            Decimal::new(8900, 2),
            Decimal::new(12000, 2),
            "VIP",
        )
        .expect("known tier");
        assert_eq!(price, Decimal::new(24000, 2));
    }

    #[test]
    fn revalidate_policy_rejects_corrupt_tiers() {
        let result = charged_unit_price(
            PricePolicy::Revalidate,
            Decimal::ONE,
            Decimal::ONE,
            "Balcony",
        );
        assert!(matches!(result, Err(AppError::Unexpected(_))));
    }

    // Worked example: 2 x General at 89.00 plus 1 x VIP at 178.00 on an
    // 89.00 base price comes to 356.00 across 3 tickets.
    #[test]
    fn worked_checkout_totals() {
        let lines = [
            (2, Decimal::new(8900, 2)),
            (1, Decimal::new(17800, 2)),
        ];
        let total: Decimal = lines
            .iter()
            .map(|(qty, price)| *price * Decimal::from(*qty))
            .sum();
        let tickets: i32 = lines.iter().map(|(qty, _)| qty).sum();

        assert_eq!(total, Decimal::new(35600, 2));
        assert_eq!(tickets, 3);
    }
}
