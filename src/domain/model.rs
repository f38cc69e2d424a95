use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// A cart line: the catalog product plus the quantity held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_amount")]
    pub amount: u32,
    /// Catalog fields the cart does not interpret, kept so they survive persistence.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_amount() -> u32 {
    1
}

impl Product {
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Transient user-facing messages emitted by the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    StockExceededOnAdd,
    StockExceededOnUpdate,
    AddFailed,
    RemoveFailed,
    UpdateFailed,
}

impl Notification {
    pub fn message(&self) -> &'static str {
        match self {
            Notification::StockExceededOnAdd | Notification::StockExceededOnUpdate => {
                "Requested quantity is out of stock"
            }
            Notification::AddFailed => "Failed to add product",
            Notification::RemoveFailed => "Failed to remove product",
            Notification::UpdateFailed => "Failed to change product quantity",
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// What a cart operation did. Nothing past the cart boundary is an error.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum CartOutcome {
    Updated,
    /// The request was silently dropped (quantity below one).
    Ignored,
    StockExceeded { requested: u64, available: u32 },
    ProductNotFound,
    ServiceFailure(String),
    StorageFailure(String),
}

impl CartOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, CartOutcome::Updated)
    }
}
