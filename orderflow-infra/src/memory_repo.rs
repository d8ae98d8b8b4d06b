use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use orderflow_core::{Order, OrderId, OrderStore, StoreError, StoreResult};

/// Process-local order store. Ids start at 1 and are never reused.
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
    next_id: AtomicI64,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn save(&self, order: &Order) -> StoreResult<Order> {
        let mut orders = self.orders.write().await;
        let mut saved = order.clone();

        match saved.id {
            // Only ids this store handed out can be written back
            Some(id) => {
                let slot = orders.get_mut(&id).ok_or(StoreError::Missing(id))?;
                *slot = saved.clone();
            }
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                saved.id = Some(id);
                orders.insert(id, saved.clone());
            }
        }
        Ok(saved)
    }

    async fn find_by_id(&self, id: OrderId) -> StoreResult<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }
}
