use crate::domain::model::{Notification, Product, ProductId, Stock};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote catalog: per-product stock and details.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn stock(&self, id: ProductId) -> Result<Stock>;
    async fn product(&self, id: ProductId) -> Result<Product>;
}

/// Synchronous local key-value slot.
pub trait PersistenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
