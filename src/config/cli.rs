use crate::config::toml_config::CartConfig;
use crate::domain::model::ProductId;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "small-cart")]
#[command(about = "Shopping cart backed by a remote stock API and local storage")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog/stock API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// Directory where the cart is persisted (overrides the config file)
    #[arg(long, global = true)]
    pub storage_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the current cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product entirely
    Remove { product_id: ProductId },
    /// Set the quantity of a product already in the cart
    Update {
        product_id: ProductId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<CartConfig> {
        let mut config = match &self.config {
            Some(path) => CartConfig::from_file(path)?,
            None => CartConfig::default(),
        };

        if let Some(endpoint) = &self.api_endpoint {
            config.catalog.base_url = endpoint.clone();
        }
        if let Some(dir) = &self.storage_dir {
            config.storage.directory = dir.clone();
        }

        Ok(config)
    }
}
