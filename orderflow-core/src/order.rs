use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::payment::PaymentMode;
use crate::product::ProductDetails;
use crate::{OrderId, ProductId, ServiceError};

/// Order status in the lifecycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Placed,
    PaymentFailed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "CREATED",
            OrderStatus::Placed => "PLACED",
            OrderStatus::PaymentFailed => "PAYMENT_FAILED",
        }
    }

    /// PLACED and PAYMENT_FAILED are never rewritten once recorded
    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Created)
    }

    /// Maps the outcome of the payment call onto the status written back to the order
    pub fn from_payment(outcome: &Result<(), ServiceError>) -> Self {
        match outcome {
            Ok(()) => OrderStatus::Placed,
            Err(_) => OrderStatus::PaymentFailed,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(OrderStatus::Created),
            "PLACED" => Ok(OrderStatus::Placed),
            "PAYMENT_FAILED" => Ok(OrderStatus::PaymentFailed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Decimal places kept for order amounts, matching the `NUMERIC(19, 2)` column
pub const AMOUNT_SCALE: u32 = 2;

/// Round an amount to [`AMOUNT_SCALE`] places, half away from zero as Postgres does
pub fn normalize_amount(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid status transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// A persisted purchase attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Assigned by the store on the first save
    pub id: Option<OrderId>,
    pub product_id: ProductId,
    pub quantity: i64,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub amount: Decimal,
}

impl Order {
    /// A fresh, unsaved order in CREATED status. The amount is normalized.
    pub fn created(product_id: ProductId, quantity: i64, amount: Decimal) -> Self {
        Self {
            id: None,
            product_id,
            quantity,
            order_date: Utc::now(),
            status: OrderStatus::Created,
            amount: normalize_amount(amount),
        }
    }

    /// Transition: CREATED -> PLACED | PAYMENT_FAILED. Terminal statuses are final.
    pub fn update_status(&mut self, status: OrderStatus) -> Result<(), InvalidTransition> {
        if self.status.is_terminal() || status == OrderStatus::Created {
            return Err(InvalidTransition {
                from: self.status,
                to: status,
            });
        }
        self.status = status;
        Ok(())
    }
}

/// Body of a place-order call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub total_amount: Decimal,
    pub payment_mode: PaymentMode,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: OrderId,
    pub order_date: DateTime<Utc>,
    pub order_status: OrderStatus,
    pub amount: Decimal,
    pub product_details: ProductDetails,
}

/// Error body shared with the product and payment services
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
    pub error_code: String,
}
