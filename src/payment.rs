use axum::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::time::Duration;
use uuid::Uuid;

/// Successful settlement details returned by the gateway.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub settled_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
#[error("Payment gateway rejected the charge: {reason}")]
pub struct PaymentError {
    pub reason: String,
}

/// External payment collaborator. The real integration (FPX, cards,
/// e-wallets) sits behind this seam; the default implementation simulates
/// a gateway round-trip and always settles.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn process(
        &self,
        order_number: &str,
        amount: Decimal,
        payment_method: &str,
    ) -> Result<PaymentReceipt, PaymentError>;
}

const SIMULATED_GATEWAY_DELAY_MS: u64 = 100;

pub struct SimulatedGateway;

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn process(
        &self,
        order_number: &str,
        amount: Decimal,
        payment_method: &str,
    ) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(Duration::from_millis(SIMULATED_GATEWAY_DELAY_MS)).await;

        let receipt = PaymentReceipt {
            transaction_id: generate_transaction_id(),
            settled_at: Utc::now(),
        };

        tracing::info!(
            order_number,
            %amount,
            payment_method,
            transaction_id = %receipt.transaction_id,
            "Simulated payment settled"
        );

        Ok(receipt)
    }
}

fn generate_transaction_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "TXN{}{}",
        Utc::now().format("%Y%m%d%H%M%S"),
        &suffix[..5].to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_ids_carry_prefix_and_suffix() {
        let id = generate_transaction_id();
        assert!(id.starts_with("TXN"));
        // TXN + 14-digit timestamp + 5-char suffix
        assert_eq!(id.len(), 3 + 14 + 5);
    }

    #[tokio::test]
    async fn simulated_gateway_settles() {
        let gateway = SimulatedGateway;
        let receipt = gateway
            .process("CNX20250101000000ABCD", Decimal::from(100), "FPX")
            .await
            .expect("simulated gateway always settles");
        assert!(receipt.transaction_id.starts_with("TXN"));
    }
}
