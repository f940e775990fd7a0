use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::SharedShop;

pub fn router() -> Router {
    Router::new()
        .route("/summary", get(summary))
        .route("/sales-by-product", get(sales_by_product))
        .route("/stock-by-product", get(stock_by_product))
}

pub async fn summary(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (StatusCode::OK, Json(shop.report())).into_response()
}

pub async fn sales_by_product(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.sales_by_product() })),
    )
        .into_response()
}

pub async fn stock_by_product(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.stock_by_product() })),
    )
        .into_response()
}
