use crate::core::{CatalogService, Notifier, PersistenceStore};
use crate::domain::model::{CartOutcome, Notification, Product, ProductId, UpdateProductAmount};
use crate::utils::error::Result;
use std::collections::HashSet;
use tokio::sync::watch;

pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Owns the in-memory cart and is the only writer of its persistence key.
///
/// Every mutation builds the next cart list, persists it, and only then
/// replaces the in-memory list, so the store and memory never disagree.
pub struct CartManager<C: CatalogService, S: PersistenceStore, N: Notifier> {
    catalog: C,
    store: S,
    notifier: N,
    key: String,
    cart: watch::Sender<Vec<Product>>,
}

impl<C: CatalogService, S: PersistenceStore, N: Notifier> CartManager<C, S, N> {
    pub fn new(catalog: C, store: S, notifier: N) -> Self {
        Self::with_key(catalog, store, notifier, DEFAULT_CART_KEY)
    }

    pub fn with_key(catalog: C, store: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();
        let initial = hydrate(&store, &key);
        tracing::debug!("Hydrated cart '{}' with {} products", key, initial.len());

        let (cart, _) = watch::channel(initial);
        Self {
            catalog,
            store,
            notifier,
            key,
            cart,
        }
    }

    pub fn cart(&self) -> Vec<Product> {
        self.cart.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Product>> {
        self.cart.subscribe()
    }

    /// Adds one unit of `product_id`, fetching its details when it is new to the cart.
    pub async fn add_product(&mut self, product_id: ProductId) -> CartOutcome {
        let current = self.cart();
        let existing = current.iter().find(|p| p.id == product_id);

        let stock = match self.catalog.stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                tracing::warn!("Stock lookup for product {} failed: {}", product_id, e);
                self.notifier.notify(Notification::AddFailed);
                return CartOutcome::ServiceFailure(e.to_string());
            }
        };

        let next = match existing {
            Some(product) => {
                let requested = u64::from(product.amount) + 1;
                if requested > u64::from(stock.amount) {
                    return self.stock_exceeded(Notification::StockExceededOnAdd, requested, stock.amount);
                }
                let amount = product.amount + 1;
                current
                    .iter()
                    .map(|p| if p.id == product_id { p.with_amount(amount) } else { p.clone() })
                    .collect::<Vec<_>>()
            }
            None => {
                if stock.amount < 1 {
                    return self.stock_exceeded(Notification::StockExceededOnAdd, 1, stock.amount);
                }

                let product = match self.catalog.product(product_id).await {
                    Ok(product) => product,
                    Err(e) => {
                        tracing::warn!("Product lookup for {} failed: {}", product_id, e);
                        self.notifier.notify(Notification::AddFailed);
                        return CartOutcome::ServiceFailure(e.to_string());
                    }
                };

                let mut next = current.clone();
                next.push(Product {
                    id: product_id,
                    amount: 1,
                    ..product
                });
                next
            }
        };

        self.commit(next, Notification::AddFailed)
    }

    pub fn remove_product(&mut self, product_id: ProductId) -> CartOutcome {
        let current = self.cart();

        if !current.iter().any(|p| p.id == product_id) {
            tracing::warn!("Cannot remove product {}: not in cart", product_id);
            self.notifier.notify(Notification::RemoveFailed);
            return CartOutcome::ProductNotFound;
        }

        let next = current.into_iter().filter(|p| p.id != product_id).collect();
        self.commit(next, Notification::RemoveFailed)
    }

    /// Sets the quantity of a product already in the cart. Amounts below one are ignored.
    pub async fn update_product_amount(&mut self, request: UpdateProductAmount) -> CartOutcome {
        let UpdateProductAmount { product_id, amount } = request;

        if amount < 1 {
            tracing::debug!("Ignoring amount {} for product {}", amount, product_id);
            return CartOutcome::Ignored;
        }

        let stock = match self.catalog.stock(product_id).await {
            Ok(stock) => stock,
            Err(e) => {
                tracing::warn!("Stock lookup for product {} failed: {}", product_id, e);
                self.notifier.notify(Notification::UpdateFailed);
                return CartOutcome::ServiceFailure(e.to_string());
            }
        };

        // amount >= 1 here, so the cast is lossless
        let requested = amount as u64;
        let amount = match u32::try_from(amount) {
            Ok(amount) if amount <= stock.amount => amount,
            _ => {
                return self.stock_exceeded(Notification::StockExceededOnUpdate, requested, stock.amount)
            }
        };

        let current = self.cart();
        if !current.iter().any(|p| p.id == product_id) {
            tracing::warn!("Cannot update product {}: not in cart", product_id);
            self.notifier.notify(Notification::UpdateFailed);
            return CartOutcome::ProductNotFound;
        }

        let next = current
            .iter()
            .map(|p| if p.id == product_id { p.with_amount(amount) } else { p.clone() })
            .collect();
        self.commit(next, Notification::UpdateFailed)
    }

    fn stock_exceeded(&self, notification: Notification, requested: u64, available: u32) -> CartOutcome {
        tracing::warn!("Requested {} units but only {} in stock", requested, available);
        self.notifier.notify(notification);
        CartOutcome::StockExceeded {
            requested,
            available,
        }
    }

    fn commit(&mut self, next: Vec<Product>, on_failure: Notification) -> CartOutcome {
        if let Err(e) = self.persist(&next) {
            tracing::error!("Failed to persist cart '{}': {}", self.key, e);
            self.notifier.notify(on_failure);
            return CartOutcome::StorageFailure(e.to_string());
        }

        tracing::info!("Cart updated: {} products", next.len());
        self.cart.send_replace(next);
        CartOutcome::Updated
    }

    fn persist(&self, cart: &[Product]) -> Result<()> {
        let json = serde_json::to_string(cart)?;
        tracing::debug!("Persisting {} bytes under '{}'", json.len(), self.key);
        self.store.set(&self.key, &json)
    }
}

fn hydrate<S: PersistenceStore>(store: &S, key: &str) -> Vec<Product> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Could not read persisted cart '{}': {}", key, e);
            return Vec::new();
        }
    };

    let products: Vec<Product> = match serde_json::from_str(&raw) {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!("Discarding unreadable persisted cart '{}': {}", key, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    products
        .into_iter()
        .filter(|p| {
            if p.amount < 1 {
                tracing::warn!("Dropping product {} with amount 0 from persisted cart", p.id);
                return false;
            }
            let first = seen.insert(p.id);
            if !first {
                tracing::warn!("Dropping duplicate product {} from persisted cart", p.id);
            }
            first
        })
        .collect()
}
