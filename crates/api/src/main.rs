use std::sync::Arc;

use varejo_app::Shop;
use varejo_store::{CsvStore, PhotoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    varejo_observability::init();

    let data_dir = std::env::var("VAREJO_DATA_DIR").unwrap_or_else(|_| {
        tracing::warn!("VAREJO_DATA_DIR not set; using ./data");
        "./data".to_string()
    });
    let bind = std::env::var("VAREJO_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let access_key = std::env::var("VAREJO_ACCESS_KEY").unwrap_or_else(|_| {
        tracing::warn!("VAREJO_ACCESS_KEY not set; using insecure dev default");
        "dev-access-key".to_string()
    });

    let store = Arc::new(CsvStore::open(&data_dir)?);
    let photos = PhotoStore::new(std::path::Path::new(&data_dir).join("images"));
    let shop = Shop::open(store, photos)?;

    let app = varejo_api::build_app(shop, access_key);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
