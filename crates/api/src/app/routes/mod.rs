use axum::Router;

pub mod accounts;
pub mod installments;
pub mod products;
pub mod reports;
pub mod sales;
pub mod system;

/// Router for all gated endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/accounts", accounts::router())
        .nest("/products", products::router())
        .nest("/sales", sales::router())
        .nest("/installments", installments::router())
        .nest("/reports", reports::router())
}
