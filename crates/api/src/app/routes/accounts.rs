use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use crate::app::SharedShop;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(register_account).get(list_accounts))
}

pub async fn register_account(
    Extension(shop): Extension<SharedShop>,
    Json(body): Json<dto::RegisterAccountRequest>,
) -> axum::response::Response {
    let mut shop = shop.write().await;
    match shop.register_account(&body.name, body.opening_balance) {
        Ok(account) => (StatusCode::CREATED, Json(account)).into_response(),
        Err(e) => errors::app_error_to_response(e),
    }
}

pub async fn list_accounts(Extension(shop): Extension<SharedShop>) -> axum::response::Response {
    let shop = shop.read().await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "items": shop.accounts() })),
    )
        .into_response()
}
