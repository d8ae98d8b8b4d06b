//! HTTP adapters for the product and payment services.
//!
//! All three share one `reqwest::Client` and resolve their target through the
//! [`ServiceRegistry`], so only logical service names appear here.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use orderflow_core::{
    ErrorResponse, InventoryClient, PaymentClient, PaymentRequest, ProductDetails, ProductId,
    ServiceError, ServiceLookup, ServiceResult,
};

use crate::registry::ServiceRegistry;

pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

fn unavailable(service: &str, e: reqwest::Error) -> ServiceError {
    let reason = if e.is_timeout() {
        "request timed out".to_string()
    } else {
        e.to_string()
    };
    ServiceError::Unavailable {
        service: service.to_string(),
        reason,
    }
}

/// Turn a non-2xx answer into `ServiceError::Remote`, keeping the
/// downstream `ErrorResponse` code when the body carries one.
async fn check_status(service: &str, response: Response) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    warn!(service, status = status.as_u16(), "Downstream call failed");
    let body = response.text().await.map_err(|e| {
        warn!(service, error = %e, "Could not read error body");
        format!("failed to read error body: {}", e)
    });
    Err(remote_error(service, status, body))
}

fn remote_error(service: &str, status: StatusCode, body: Result<String, String>) -> ServiceError {
    let fallback_code = if status.is_server_error() { "UNAVAILABLE" } else { "UNKNOWN" };

    let message = match body {
        Ok(body) => match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(decoded) => {
                return ServiceError::Remote {
                    service: service.to_string(),
                    code: decoded.error_code,
                    status: status.as_u16(),
                    message: decoded.error_message,
                }
            }
            Err(_) if body.is_empty() => status.canonical_reason().unwrap_or("no reason").to_string(),
            Err(_) => body,
        },
        Err(read_failure) => read_failure,
    };

    ServiceError::Remote {
        service: service.to_string(),
        code: fallback_code.to_string(),
        status: status.as_u16(),
        message,
    }
}

/// Reserves stock through the product service
pub struct HttpInventoryClient {
    http: Client,
    registry: Arc<ServiceRegistry>,
    service: String,
}

impl HttpInventoryClient {
    pub fn new(http: Client, registry: Arc<ServiceRegistry>, service: impl Into<String>) -> Self {
        Self {
            http,
            registry,
            service: service.into(),
        }
    }
}

#[async_trait]
impl InventoryClient for HttpInventoryClient {
    async fn reduce_quantity(&self, product_id: ProductId, quantity: i64) -> ServiceResult<()> {
        let url = self
            .registry
            .url(&self.service, &format!("product/reduceQuantity/{}", product_id))?;
        debug!(url = url.as_str(), quantity, "Reducing product quantity");

        let response = self
            .http
            .put(url)
            .query(&[("quantity", quantity)])
            .send()
            .await
            .map_err(|e| unavailable(&self.service, e))?;

        check_status(&self.service, response).await?;
        Ok(())
    }
}

pub struct HttpPaymentClient {
    http: Client,
    registry: Arc<ServiceRegistry>,
    service: String,
}

impl HttpPaymentClient {
    pub fn new(http: Client, registry: Arc<ServiceRegistry>, service: impl Into<String>) -> Self {
        Self {
            http,
            registry,
            service: service.into(),
        }
    }
}

#[async_trait]
impl PaymentClient for HttpPaymentClient {
    async fn do_payment(&self, request: &PaymentRequest) -> ServiceResult<()> {
        let url = self.registry.url(&self.service, "payment")?;
        debug!(url = url.as_str(), order_id = request.order_id, "Submitting payment");

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| unavailable(&self.service, e))?;

        check_status(&self.service, response).await?;
        Ok(())
    }
}

/// Product payload from the product service; only id and name are kept.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductResponse {
    product_id: ProductId,
    product_name: String,
}

pub struct HttpServiceLookup {
    http: Client,
    registry: Arc<ServiceRegistry>,
    service: String,
}

impl HttpServiceLookup {
    pub fn new(http: Client, registry: Arc<ServiceRegistry>, service: impl Into<String>) -> Self {
        Self {
            http,
            registry,
            service: service.into(),
        }
    }
}

#[async_trait]
impl ServiceLookup for HttpServiceLookup {
    async fn get_product_by_id(&self, product_id: ProductId) -> ServiceResult<ProductDetails> {
        let url = self
            .registry
            .url(&self.service, &format!("product/{}", product_id))?;
        debug!(url = url.as_str(), "Fetching product");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable(&self.service, e))?;

        let product: ProductResponse = check_status(&self.service, response)
            .await?
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse {
                service: self.service.clone(),
                reason: e.to_string(),
            })?;

        Ok(ProductDetails {
            product_id: product.product_id,
            product_name: product.product_name,
        })
    }
}
