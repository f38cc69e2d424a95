// Adapters layer: concrete implementations for external systems (catalog http, storage, notifications).

pub mod http;
pub mod notifier;
pub mod storage;

pub use http::HttpCatalog;
pub use notifier::{ChannelNotifier, TracingNotifier};
pub use storage::{FileStore, MemoryStore};
