use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use varejo_app::AppError;
use varejo_core::DomainError;

/// Map an application failure onto a status code + JSON body.
///
/// Business rejections keep their 4xx shape; a persistence failure is a
/// 500 because the session may have diverged from disk.
pub fn app_error_to_response(err: AppError) -> axum::response::Response {
    match err {
        AppError::Rejected(domain) => match domain {
            DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
            DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
            DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
            DomainError::DuplicateAccount(name) => json_error(
                StatusCode::CONFLICT,
                "duplicate_account",
                format!("account '{name}' already exists"),
            ),
            DomainError::DuplicateProduct(name) => json_error(
                StatusCode::CONFLICT,
                "duplicate_product",
                format!("product '{name}' already exists"),
            ),
            DomainError::InsufficientFunds(account) => json_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_funds",
                format!("insufficient funds in account '{account}'"),
            ),
            DomainError::InsufficientStock(product) => json_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "insufficient_stock",
                format!("insufficient stock for product '{product}'"),
            ),
            DomainError::Negative => json_error(
                StatusCode::UNPROCESSABLE_ENTITY,
                "negative_quantity",
                "quantity would go negative",
            ),
        },
        AppError::Store(e) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            e.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
