use anyhow::Result;
use shopfront::config::Config;
use shopfront::shop::rest::ShopRest;
use shopfront::shop::types::CartForm;
use shopfront::shop::CartApi;
use shopfront::submit;
use shopfront::tui::{self, state::AppState};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

#[tokio::main]
async fn main() -> Result<()> {
    // The terminal belongs to the TUI, so traces go to a file.
    let log_file = std::fs::File::create("shopfront.log")?;
    tracing_subscriber::fmt()
        .with_env_filter("shopfront=info")
        .with_writer(log_file)
        .init();

    let config = Config::load(Path::new("config.toml"))?;
    if config.products.is_empty() {
        anyhow::bail!("config.toml lists no products; nothing to put on the menu");
    }

    println!();
    println!("  Shopfront v0.1.0");
    println!("  ================");
    println!("  Storefront: {}", config.shop.base_url);
    println!("  {} items on the menu", config.products.len());
    println!();

    let api: Arc<dyn CartApi> = Arc::new(ShopRest::new());

    let (state_tx, state_rx) = watch::channel(AppState::from_config(&config));
    let (submit_tx, submit_rx) = mpsc::channel::<CartForm>(64);

    let dispatcher = tokio::spawn(submit::run_dispatcher(api, submit_rx, state_tx.clone()));

    let result = tui::run_tui(state_tx, state_rx, submit_tx).await;

    dispatcher.abort();
    result
}
