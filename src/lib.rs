pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{ChannelNotifier, FileStore, HttpCatalog, MemoryStore, TracingNotifier};
pub use config::CartConfig;
pub use crate::core::{cart::CartManager, provider::CartProvider};
pub use domain::model::{CartOutcome, Notification, Product, Stock, UpdateProductAmount};
pub use utils::error::{CartError, Result};
