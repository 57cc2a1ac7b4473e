//! Products API client.

use crate::{FetchClient, FetchError};
use kira_commerce::catalog::Product;
use kira_commerce::ids::ProductId;
use serde::Deserialize;

/// Client for the storefront catalog endpoints.
pub struct ProductsClient {
    http: FetchClient,
}

impl ProductsClient {
    /// Create a client for the API at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: FetchClient::new().with_base_url(base_url),
        }
    }

    /// Fetch the full catalog.
    pub fn list(&self) -> Result<Vec<Product>, FetchError> {
        let response = self.http.get("/api/products").send()?.error_for_status()?;
        let envelope: ProductsEnvelope = response.json()?;
        Ok(envelope.products)
    }

    /// Fetch a single product.
    pub fn get(&self, id: ProductId) -> Result<Product, FetchError> {
        let response = self
            .http
            .get(format!("/api/products/{id}"))
            .send()?
            .error_for_status()?;
        let envelope: ProductEnvelope = response.json()?;
        Ok(envelope.product)
    }
}

#[derive(Debug, Deserialize)]
struct ProductsEnvelope {
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Product,
}
