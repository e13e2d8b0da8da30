//! Client side of the product lookup endpoint.

use async_trait::async_trait;
use reqwest::Client;
use shared::{domain::Product, error::ApiError, protocol::products_route};
use tracing::{debug, warn};
use url::Url;

use crate::error::FetchError;

#[async_trait]
pub trait ProductLookup: Send + Sync {
    async fn lookup(&self, handle: &str) -> Result<Product, FetchError>;
}

pub struct HttpProductLookup {
    http: Client,
    server_url: String,
}

impl HttpProductLookup {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl Into<String>) -> Self {
        Self {
            http,
            server_url: server_url.into(),
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

/// Builds `{server_url}/api/products/{handle}` with the handle escaped as one path segment.
pub fn product_url(server_url: &str, handle: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(server_url)?;
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?;
        segments.pop_if_empty();
        for segment in products_route().split('/').filter(|s| !s.is_empty()) {
            segments.push(segment);
        }
        segments.push(handle);
    }
    Ok(url)
}

#[async_trait]
impl ProductLookup for HttpProductLookup {
    async fn lookup(&self, handle: &str) -> Result<Product, FetchError> {
        let url = product_url(&self.server_url, handle)?;
        debug!(%url, "fetching product");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Product>().await?);
        }

        let body = response.bytes().await?;
        let message = serde_json::from_slice::<ApiError>(&body)
            .ok()
            .map(|err| err.message)
            .filter(|message| !message.is_empty());
        warn!(%handle, status = status.as_u16(), ?message, "product lookup rejected");
        Err(FetchError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
