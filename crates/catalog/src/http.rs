//! HTTP clients for the customer and product services.

use std::time::Duration;

use async_trait::async_trait;
use common::{CustomerId, ProductId};
use domain::{Customer, Product};
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::customer::{self, CustomerDirectory};
use crate::error::LookupError;
use crate::product::{self, ProductCatalog};

/// Shared HTTP plumbing for `GET {base}/{resource}/{id}` lookups.
#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpLookupClient {
    /// Creates a client for the service at `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| LookupError::Configuration(format!("invalid base URL {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::Configuration(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    fn endpoint(&self, resource: &str, id: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| LookupError::Configuration(format!("base URL {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .push(resource)
            .push(id);
        Ok(url)
    }

    /// Fetches and decodes one entity. HTTP 404 maps to [`LookupError::NotFound`].
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        entity: &'static str,
        resource: &str,
        id: &str,
    ) -> Result<T, LookupError> {
        let url = self.endpoint(resource, id)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(entity, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(entity, id, "lookup returned 404");
            return Err(LookupError::NotFound {
                entity,
                id: id.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(entity, id, %status, "lookup returned unexpected status");
            return Err(LookupError::Unavailable {
                entity,
                reason: format!("unexpected status {status}: {}", body.trim()),
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                LookupError::InvalidResponse {
                    entity,
                    reason: e.to_string(),
                }
            } else {
                self.transport_error(entity, e)
            }
        })
    }

    fn transport_error(&self, entity: &'static str, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout {
                entity,
                after: self.timeout,
            }
        } else {
            LookupError::Unavailable {
                entity,
                reason: err.to_string(),
            }
        }
    }
}

/// Customer lookups over HTTP (`GET {base}/customer/{id}`).
#[derive(Debug, Clone)]
pub struct HttpCustomerDirectory {
    inner: HttpLookupClient,
}

impl HttpCustomerDirectory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            inner: HttpLookupClient::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl CustomerDirectory for HttpCustomerDirectory {
    async fn get_customer(&self, id: &CustomerId) -> Result<Customer, LookupError> {
        self.inner
            .fetch(customer::ENTITY, "customer", id.as_str())
            .await
    }
}

/// Product lookups over HTTP (`GET {base}/product/{id}`).
#[derive(Debug, Clone)]
pub struct HttpProductCatalog {
    inner: HttpLookupClient,
}

impl HttpProductCatalog {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            inner: HttpLookupClient::new(base_url, timeout)?,
        })
    }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
    async fn get_product(&self, id: &ProductId) -> Result<Product, LookupError> {
        self.inner
            .fetch(product::ENTITY, "product", id.as_str())
            .await
    }
}
