pub mod cart;
pub mod provider;

pub use crate::domain::model::{CartOutcome, Notification, Product, ProductId, Stock, UpdateProductAmount};
pub use crate::domain::ports::{CatalogService, Notifier, PersistenceStore};
pub use crate::utils::error::Result;
