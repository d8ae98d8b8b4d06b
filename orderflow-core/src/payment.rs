use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OrderId, ServiceResult};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Cash,
    Paypal,
    DebitCard,
    CreditCard,
    ApplePay,
    Card,
}

/// Charge sent to the payment service for a saved order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub order_id: OrderId,
    /// Sent as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    pub payment_mode: PaymentMode,
}

#[async_trait]
pub trait PaymentClient: Send + Sync {
    /// Charge the order. Any error means the payment did not go through.
    async fn do_payment(&self, request: &PaymentRequest) -> ServiceResult<()>;
}
