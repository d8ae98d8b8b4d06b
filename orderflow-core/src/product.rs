use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{ProductId, ServiceResult};

/// Product fields carried into an order response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub product_id: ProductId,
    pub product_name: String,
}

#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Reserve `quantity` units of the product ahead of payment
    async fn reduce_quantity(&self, product_id: ProductId, quantity: i64) -> ServiceResult<()>;
}

/// Fetches product data from the remote product service
#[async_trait]
pub trait ServiceLookup: Send + Sync {
    async fn get_product_by_id(&self, product_id: ProductId) -> ServiceResult<ProductDetails>;
}
