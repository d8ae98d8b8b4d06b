use async_trait::async_trait;

use crate::order::Order;
use crate::{OrderId, StoreResult};

/// Repository trait for order data access
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert the order when it has no id yet, overwrite it otherwise.
    /// The returned order always carries its id.
    async fn save(&self, order: &Order) -> StoreResult<Order>;

    async fn find_by_id(&self, id: OrderId) -> StoreResult<Option<Order>>;
}
