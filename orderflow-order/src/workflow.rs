use std::sync::Arc;

use orderflow_core::{
    normalize_amount, InventoryClient, Order, OrderId, OrderRequest, OrderResponse, OrderStatus,
    OrderStore, PaymentClient, PaymentRequest, ServiceLookup, StoreError,
};
use tracing::{error, info};

use crate::error::OrderError;

/// Coordinates inventory reservation, order persistence and payment.
///
/// The workflow holds no state of its own; every call goes straight to the
/// injected collaborators.
pub struct OrderWorkflow {
    store: Arc<dyn OrderStore>,
    inventory: Arc<dyn InventoryClient>,
    payment: Arc<dyn PaymentClient>,
    lookup: Arc<dyn ServiceLookup>,
}

impl OrderWorkflow {
    pub fn new(
        store: Arc<dyn OrderStore>,
        inventory: Arc<dyn InventoryClient>,
        payment: Arc<dyn PaymentClient>,
        lookup: Arc<dyn ServiceLookup>,
    ) -> Self {
        Self {
            store,
            inventory,
            payment,
            lookup,
        }
    }

    /// Reserve stock, record the order, then try to charge it.
    ///
    /// Returns the order id whenever the reservation and the first save succeed,
    /// whatever the payment outcome. A failed payment does not release the
    /// reserved stock.
    pub async fn place_order(&self, request: &OrderRequest) -> Result<OrderId, OrderError> {
        info!(
            product_id = request.product_id,
            quantity = request.quantity,
            "Placing order request"
        );

        self.inventory
            .reduce_quantity(request.product_id, request.quantity)
            .await
            .map_err(OrderError::Inventory)?;

        // The stored and the charged amount must be the same value
        let amount = normalize_amount(request.total_amount);

        info!("Creating order with status CREATED");
        let order = Order::created(request.product_id, request.quantity, amount);
        let mut order = self.store.save(&order).await?;
        let order_id = order
            .id
            .ok_or_else(|| StoreError::Corrupt("store returned an order without an id".to_string()))?;

        info!(order_id, "Calling payment service to complete the payment");
        let payment = PaymentRequest {
            order_id,
            amount,
            reference_number: None,
            payment_mode: request.payment_mode,
        };

        let outcome = self.payment.do_payment(&payment).await;
        match &outcome {
            Ok(()) => info!(order_id, "Payment done successfully, marking order PLACED"),
            Err(e) => error!(order_id, error = %e, "Payment failed, marking order PAYMENT_FAILED"),
        }

        order.update_status(OrderStatus::from_payment(&outcome))?;
        self.store.save(&order).await?;

        info!(order_id, status = %order.status, "Order processed");
        Ok(order_id)
    }

    /// Load a stored order and attach fresh product details from the product service
    pub async fn get_order_details(&self, order_id: OrderId) -> Result<OrderResponse, OrderError> {
        info!(order_id, "Get order details");

        let order = self
            .store
            .find_by_id(order_id)
            .await?
            .ok_or(OrderError::NotFound(order_id))?;

        info!(product_id = order.product_id, "Fetching product from product service");
        let product_details = self
            .lookup
            .get_product_by_id(order.product_id)
            .await
            .map_err(OrderError::Lookup)?;

        Ok(OrderResponse {
            order_id,
            order_date: order.order_date,
            order_status: order.status,
            amount: order.amount,
            product_details,
        })
    }
}
