use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use varejo_app::NewProduct;
use varejo_core::ProductId;

use crate::app::SharedShop;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_product).get(list_products))
        .route("/low-stock", get(low_stock))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(remove_product),
        )
        .route("/:id/photo", post(upload_photo))
}

fn parse_id(id: &str) -> Result<ProductId, axum::response::Response> {
    id.parse::<ProductId>().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id")
    })
}

pub async fn register_product(
    Extension(shop): Extension<SharedShop>,
    Json(body): Json<dto::RegisterProductRequest>,
) -> axum::response::Response {
    let mut shop = shop.write().await;
    let result = shop.register_product(NewProduct {
        name: body.name,
        category: body.category,
        purchase_price: body.purchase_price,
        sale_price: body.sale_price,
        quantity: body.quantity,
        funding_account: body.funding_account,
        photo: None,
    });
    match result {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn list_products(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.products() })),
    )
        .into_response()
}

pub async fn get_product(
    Extension(shop): Extension<SharedShop>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let shop = shop.read().await;
    match shop.product(id) {
        Some(product) => (StatusCode::OK, Json(product)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
    }
}

pub async fn update_product(
    Extension(shop): Extension<SharedShop>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let mut shop = shop.write().await;
    match shop.update_product(id, body.into()) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn remove_product(
    Extension(shop): Extension<SharedShop>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let mut shop = shop.write().await;
    match shop.remove_product(id) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

/// Raw photo bytes in the body; the original filename rides in the query.
pub async fn upload_photo(
    Extension(shop): Extension<SharedShop>,
    Path(id): Path<String>,
    Query(query): Query<dto::PhotoQuery>,
    body: Bytes,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let mut shop = shop.write().await;
    match shop.set_product_photo(id, &query.filename, &body) {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn low_stock(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.low_stock() })),
    )
        .into_response()
}
