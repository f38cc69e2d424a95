// Application wiring: builds a cart over the http catalog and file storage from configuration.

use crate::adapters::{FileStore, HttpCatalog};
use crate::config::CartConfig;
use crate::core::cart::CartManager;
use crate::core::provider::CartProvider;
use crate::core::Notifier;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub type AppCart<N> = CartManager<HttpCatalog, FileStore, N>;

pub fn open_cart<N: Notifier>(config: &CartConfig, notifier: N) -> Result<AppCart<N>> {
    config.validate()?;

    let catalog = HttpCatalog::with_timeout(&config.catalog.base_url, config.request_timeout())?;
    let store = FileStore::new(&config.storage.directory);
    tracing::debug!(
        "Opening cart '{}' in {} against {}",
        config.storage.key,
        store.base_path().display(),
        catalog.base_url()
    );

    Ok(CartManager::with_key(
        catalog,
        store,
        notifier,
        config.storage.key.clone(),
    ))
}

pub fn open_provider<N: Notifier>(
    config: &CartConfig,
    notifier: N,
) -> Result<CartProvider<HttpCatalog, FileStore, N>> {
    Ok(CartProvider::new(open_cart(config, notifier)?))
}
