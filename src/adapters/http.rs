use crate::domain::model::{Product, ProductId, Stock};
use crate::domain::ports::CatalogService;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Catalog/stock API client: `GET stock/{id}` and `GET products/{id}` under a base URL.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: Url,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        // join() drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        tracing::debug!("Making API request to: {}", url);

        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body = response.error_for_status()?.json::<T>().await?;
        Ok(body)
    }
}

#[async_trait]
impl CatalogService for HttpCatalog {
    async fn stock(&self, id: ProductId) -> Result<Stock> {
        self.get_json(&format!("stock/{}", id)).await
    }

    async fn product(&self, id: ProductId) -> Result<Product> {
        self.get_json(&format!("products/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CartError;
    use httpmock::prelude::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let catalog = HttpCatalog::new("http://localhost:3333/api").unwrap();
        assert_eq!(catalog.base_url().as_str(), "http://localhost:3333/api/");

        let catalog = HttpCatalog::new("http://localhost:3333").unwrap();
        assert_eq!(catalog.base_url().as_str(), "http://localhost:3333/");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpCatalog::new("not a url");
        assert!(matches!(result, Err(CartError::UrlError(_))));
    }

    #[tokio::test]
    async fn test_stock_lookup() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/api/stock/1");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 1, "amount": 3}));
        });

        let catalog = HttpCatalog::new(&server.url("/api")).unwrap();
        let stock = catalog.stock(1).await.unwrap();

        stock_mock.assert();
        assert_eq!(stock, Stock { id: 1, amount: 3 });
    }

    #[tokio::test]
    async fn test_product_lookup() {
        let server = MockServer::start();
        let product_mock = server.mock(|when, then| {
            when.method(GET).path("/products/2");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "id": 2,
                    "title": "Tênis VR Caminhada Confortável",
                    "price": 139.9,
                    "image": "https://example.com/2.jpg"
                }));
        });

        let catalog = HttpCatalog::new(&server.base_url()).unwrap();
        let product = catalog.product(2).await.unwrap();

        product_mock.assert();
        assert_eq!(product.id, 2);
        assert_eq!(product.price, 139.9);
        assert_eq!(product.amount, 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start();
        let stock_mock = server.mock(|when, then| {
            when.method(GET).path("/stock/9");
            then.status(404);
        });

        let catalog = HttpCatalog::new(&server.base_url()).unwrap();
        let result = catalog.stock(9).await;

        stock_mock.assert();
        assert!(matches!(result, Err(CartError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/stock/1");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("{\"id\": 1}");
        });

        let catalog = HttpCatalog::new(&server.base_url()).unwrap();
        assert!(catalog.stock(1).await.is_err());
    }
}
