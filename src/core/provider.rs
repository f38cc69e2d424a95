use crate::core::cart::CartManager;
use crate::core::{CatalogService, Notifier, PersistenceStore};
use crate::domain::model::{CartOutcome, Product, ProductId, UpdateProductAmount};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Cloneable handle that lets any part of the application read and mutate one shared cart.
///
/// Reads go through a `watch` receiver and never wait on a running mutation;
/// mutations are applied one at a time.
pub struct CartProvider<C: CatalogService, S: PersistenceStore, N: Notifier> {
    manager: Arc<Mutex<CartManager<C, S, N>>>,
    cart: watch::Receiver<Vec<Product>>,
}

impl<C: CatalogService, S: PersistenceStore, N: Notifier> Clone for CartProvider<C, S, N> {
    fn clone(&self) -> Self {
        Self {
            manager: Arc::clone(&self.manager),
            cart: self.cart.clone(),
        }
    }
}

impl<C: CatalogService, S: PersistenceStore, N: Notifier> CartProvider<C, S, N> {
    pub fn new(manager: CartManager<C, S, N>) -> Self {
        let cart = manager.subscribe();
        Self {
            manager: Arc::new(Mutex::new(manager)),
            cart,
        }
    }

    pub fn cart(&self) -> Vec<Product> {
        self.cart.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.cart.clone()
    }

    pub async fn add_product(&self, product_id: ProductId) -> CartOutcome {
        self.manager.lock().await.add_product(product_id).await
    }

    pub async fn remove_product(&self, product_id: ProductId) -> CartOutcome {
        self.manager.lock().await.remove_product(product_id)
    }

    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> CartOutcome {
        self.manager.lock().await.update_product_amount(request).await
    }
}
