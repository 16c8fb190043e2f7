use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Insufficient inventory: {0}")]
    InsufficientInventory(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientInventory(_) => StatusCode::CONFLICT,
            AppError::EmptyCart => StatusCode::BAD_REQUEST,
            AppError::PaymentFailed(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::AuthError(_) => "AUTH_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InsufficientInventory(_) => "INSUFFICIENT_INVENTORY",
            AppError::EmptyCart => "EMPTY_CART",
            AppError::PaymentFailed(_) => "PAYMENT_FAILED",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::Unexpected(_) => "UNEXPECTED_ERROR",
        }
    }

    fn log(&self) {
        match self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::InsufficientInventory(msg)
            | AppError::PaymentFailed(msg)
            | AppError::Unexpected(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
            AppError::EmptyCart => {
                error!(error = ?self, "Application error");
            }
            AppError::DatabaseError(e) => {
                error!(error = ?e, "Database error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        // Log internal details
        self.log();

        // Only expose high-level message to the client
        let public_message = match &self {
            AppError::ValidationError(msg)
            | AppError::AuthError(msg)
            | AppError::NotFound(msg)
            | AppError::InsufficientInventory(msg)
            | AppError::PaymentFailed(msg) => msg.clone(),
            AppError::EmptyCart => "Your cart is empty".to_string(),
            AppError::DatabaseError(_) => "A database error occurred".to_string(),
            AppError::Unexpected(_) => {
                "An unexpected error occurred, please contact support".to_string()
            }
        };

        // Do not expose internal details in the API response
        let details = None;

        error_response(code, public_message, details, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_conflicts_map_to_409() {
        let err = AppError::InsufficientInventory("Only 2 tickets available".to_string());
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code(), "INSUFFICIENT_INVENTORY");
    }

    #[test]
    fn empty_cart_maps_to_400() {
        assert_eq!(AppError::EmptyCart.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EmptyCart.code(), "EMPTY_CART");
    }

    #[test]
    fn payment_failures_keep_their_own_code() {
        let err = AppError::PaymentFailed("Gateway declined".to_string());
        assert_eq!(err.status_code(), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(err.code(), "PAYMENT_FAILED");
    }
}
