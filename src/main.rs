use clap::Parser;
use small_cart::app::open_cart;
use small_cart::utils::logger;
use small_cart::{CartOutcome, ChannelNotifier, CliConfig, Command, Product, UpdateProductAmount};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting small-cart CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let (notifier, mut notifications) = ChannelNotifier::new();
    let mut cart = match open_cart(&config, notifier) {
        Ok(cart) => cart,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let outcome = match cli.command {
        Command::Show => None,
        Command::Add { product_id } => Some(cart.add_product(product_id).await),
        Command::Remove { product_id } => Some(cart.remove_product(product_id)),
        Command::Update { product_id, amount } => Some(
            cart.update_product_amount(UpdateProductAmount { product_id, amount })
                .await,
        ),
    };

    // 顯示通知訊息
    while let Ok(notification) = notifications.try_recv() {
        eprintln!("⚠️  {}", notification);
    }

    print_cart(&cart.cart());

    // 非成功結果以退出碼回報
    let exit_code = match outcome {
        None | Some(CartOutcome::Updated) | Some(CartOutcome::Ignored) => 0,
        Some(CartOutcome::StockExceeded { .. }) | Some(CartOutcome::ProductNotFound) => 2,
        Some(CartOutcome::ServiceFailure(_)) | Some(CartOutcome::StorageFailure(_)) => 1,
    };
    if exit_code > 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn print_cart(cart: &[Product]) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    let mut total = 0.0;
    for product in cart {
        let subtotal = product.price * f64::from(product.amount);
        total += subtotal;
        println!(
            "#{:<4} {:<40} {:>3} x {:>8.2} = {:>9.2}",
            product.id, product.title, product.amount, product.price, subtotal
        );
    }
    println!("Total: {:.2}", total);
}
