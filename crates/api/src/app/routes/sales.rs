use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use varejo_app::SaleRequest;
use varejo_core::ProductId;

use crate::app::SharedShop;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(record_sale).get(list_sales))
}

pub async fn record_sale(
    Extension(shop): Extension<SharedShop>,
    Json(body): Json<dto::RecordSaleRequest>,
) -> axum::response::Response {
    let product_id = match body.product_id.parse::<ProductId>() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id");
        }
    };

    let mut shop = shop.write().await;
    let result = shop.record_sale(SaleRequest {
        product_id,
        quantity: body.quantity,
        customer: body.customer,
        payment_method: body.payment_method,
        installment_count: body.installment_count,
        receiving_account: body.receiving_account,
    });
    match result {
        Ok(sale) => (StatusCode::CREATED, Json(sale)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn list_sales(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.sales() })),
    )
        .into_response()
}
