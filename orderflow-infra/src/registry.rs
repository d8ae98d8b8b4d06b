use std::collections::HashMap;

use orderflow_core::{ServiceError, ServiceResult};

/// Resolves logical service names (e.g. `PRODUCT-SERVICE`) to base URLs.
/// Names are matched case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    endpoints: HashMap<String, String>,
}

impl ServiceRegistry {
    pub fn new<I, K, V>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let endpoints = endpoints
            .into_iter()
            .map(|(name, base)| {
                (
                    name.as_ref().to_ascii_lowercase(),
                    base.as_ref().trim_end_matches('/').to_string(),
                )
            })
            .collect();

        Self { endpoints }
    }

    pub fn resolve(&self, service: &str) -> ServiceResult<&str> {
        self.endpoints
            .get(&service.to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| ServiceError::UnknownService(service.to_string()))
    }

    /// Full request URL for `path` on `service`
    pub fn url(&self, service: &str, path: &str) -> ServiceResult<String> {
        let base = self.resolve(service)?;
        Ok(format!("{}/{}", base, path.trim_start_matches('/')))
    }
}
