use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use varejo_core::InstallmentId;

use crate::app::SharedShop;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_installment).get(list_installments))
        .route("/outstanding", get(list_outstanding))
        .route("/:id/pay", post(mark_paid))
}

pub async fn register_installment(
    Extension(shop): Extension<SharedShop>,
    Json(body): Json<dto::RegisterInstallmentRequest>,
) -> axum::response::Response {
    let mut shop = shop.write().await;
    let result = shop.register_installment(
        &body.customer,
        &body.product,
        body.amount,
        body.term,
        body.paid,
    );
    match result {
        Ok(agreement) => (StatusCode::CREATED, Json(agreement)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn list_installments(
    Extension(shop): Extension<SharedShop>,
) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.installments() })),
    )
        .into_response()
}

pub async fn list_outstanding(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.outstanding_installments() })),
    )
        .into_response()
}

pub async fn mark_paid(
    Extension(shop): Extension<SharedShop>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match id.parse::<InstallmentId>() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_id",
                "invalid installment id",
            );
        }
    };
    let mut shop = shop.write().await;
    match shop.mark_installment_paid(id) {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "paid": true }))).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}
