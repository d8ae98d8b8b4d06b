pub mod app_config;
pub mod clients;
pub mod database;
pub mod memory_repo;
pub mod order_repo;
pub mod registry;

pub use clients::{HttpInventoryClient, HttpPaymentClient, HttpServiceLookup};
pub use database::DbClient;
pub use memory_repo::InMemoryOrderStore;
pub use order_repo::PgOrderStore;
pub use registry::ServiceRegistry;
