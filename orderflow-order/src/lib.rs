pub mod error;
pub mod workflow;

pub use error::OrderError;
pub use workflow::OrderWorkflow;
