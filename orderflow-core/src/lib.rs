pub mod order;
pub mod payment;
pub mod product;
pub mod repository;

pub use order::{
    normalize_amount, ErrorResponse, InvalidTransition, Order, OrderRequest, OrderResponse,
    OrderStatus, AMOUNT_SCALE,
};
pub use payment::{PaymentClient, PaymentMode, PaymentRequest};
pub use product::{InventoryClient, ProductDetails, ServiceLookup};
pub use repository::OrderStore;

/// Store-assigned order identifier
pub type OrderId = i64;

pub type ProductId = i64;

/// Failures reported by a remote collaborator (inventory, payment, product lookup)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} rejected the request ({status} {code}): {message}")]
    Remote {
        service: String,
        code: String,
        status: u16,
        message: String,
    },
    #[error("{service} unavailable: {reason}")]
    Unavailable { service: String, reason: String },
    #[error("Invalid response from {service}: {reason}")]
    InvalidResponse { service: String, reason: String },
    #[error("No endpoint registered for service {0}")]
    UnknownService(String),
}

impl ServiceError {
    /// Remote error code and status, when the downstream service sent one
    pub fn remote_code(&self) -> Option<(&str, u16)> {
        match self {
            ServiceError::Remote { code, status, .. } => Some((code.as_str(), *status)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Corrupt order record: {0}")]
    Corrupt(String),
    #[error("No stored order with id {0}")]
    Missing(OrderId),
}

pub type StoreResult<T> = Result<T, StoreError>;
pub type ServiceResult<T> = Result<T, ServiceError>;
