use orderflow_core::{InvalidTransition, OrderId, ServiceError, StoreError};

/// Errors surfaced by the order workflow.
///
/// Payment failures are absent on purpose: they end up as the PAYMENT_FAILED
/// status on the order instead.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Order not found for the order Id: {0}")]
    NotFound(OrderId),

    #[error("Inventory reservation failed: {0}")]
    Inventory(#[source] ServiceError),

    #[error("Order persistence failed: {0}")]
    Store(#[from] StoreError),

    #[error("Product lookup failed: {0}")]
    Lookup(#[source] ServiceError),

    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

impl OrderError {
    /// Symbolic code reported to callers
    pub fn code(&self) -> &str {
        match self {
            OrderError::NotFound(_) => "NOT_FOUND",
            OrderError::Inventory(e) => e.remote_code().map_or("INVENTORY_UNAVAILABLE", |(code, _)| code),
            OrderError::Store(_) => "STORE_FAILURE",
            OrderError::Lookup(e) => e.remote_code().map_or("PRODUCT_LOOKUP_FAILED", |(code, _)| code),
            OrderError::Transition(_) => "INVALID_TRANSITION",
        }
    }

    /// HTTP-style status reported to callers
    pub fn status(&self) -> u16 {
        match self {
            OrderError::NotFound(_) => 404,
            OrderError::Inventory(e) | OrderError::Lookup(e) => e.remote_code().map_or(502, |(_, status)| status),
            OrderError::Store(_) => 500,
            OrderError::Transition(_) => 409,
        }
    }
}
