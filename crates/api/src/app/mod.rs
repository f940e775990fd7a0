//! HTTP API application wiring (Axum router + state).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tokio::sync::RwLock;

use varejo_app::Shop;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// The shop session behind one lock: all access is serialized through it,
/// mutations taking the write half (single-writer by construction).
pub type SharedShop = Arc<RwLock<Shop>>;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(shop: Shop, access_key: String) -> Router {
    let shop: SharedShop = Arc::new(RwLock::new(shop));
    let access = middleware::AccessState { key: access_key };

    // Protected routes: everything except the health probe.
    let protected = routes::router()
        .layer(Extension(shop))
        .layer(axum::middleware::from_fn_with_state(
            access,
            middleware::access_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
