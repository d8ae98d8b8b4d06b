use std::sync::Arc;

use orderflow_order::OrderWorkflow;

#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<OrderWorkflow>,
}

impl AppState {
    pub fn new(workflow: OrderWorkflow) -> Self {
        Self {
            workflow: Arc::new(workflow),
        }
    }
}
