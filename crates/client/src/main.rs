//! Command-line driver: pages through the top-rated listing and prints each
//! product card, optionally adding one product to the cart.

use std::sync::Arc;

use anyhow::Context;
use storefront_client::view::{MemoryCartView, StdoutGrid, Toggle};
use storefront_client::{
    CartActionHandler, ClientConfig, HttpStorefrontApi, LoadOutcome, ProductListPaginator,
};
use storefront_core::ProductId;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ClientConfig::from_env();
    let api = Arc::new(
        HttpStorefrontApi::new(&config.api_url, config.timeout)
            .context("failed to build HTTP client")?,
    );
    tracing::info!(api_url = %config.api_url, page_size = config.page_size, "browsing top rated products");

    let mut paginator = ProductListPaginator::new(Arc::clone(&api), StdoutGrid, Toggle::default())
        .with_page_size(config.page_size);

    loop {
        match paginator.load_next().await? {
            LoadOutcome::Loaded { exhausted: false, .. } => continue,
            LoadOutcome::Loaded { exhausted: true, .. } | LoadOutcome::Exhausted => break,
        }
    }
    tracing::info!(
        pages = paginator.current_page(),
        cards = paginator.rendered(),
        "listing exhausted"
    );

    if let Ok(product_id) = std::env::var("STOREFRONT_ADD_TO_CART") {
        let view = Arc::new(Mutex::new(MemoryCartView::with_count("0")));
        let cart = CartActionHandler::new(api, Arc::clone(&view), config.csrf_token())
            .announce_success(config.announce_success);

        let product_id = product_id
            .parse::<ProductId>()
            .context("STOREFRONT_ADD_TO_CART is not a product id")?;
        cart.add_to_cart(product_id).await?;

        let view = view.lock().await;
        println!("cart count: {}", view.count_text);
        for notice in &view.notices {
            println!("notice: {notice}");
        }
    }

    Ok(())
}
