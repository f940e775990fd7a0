use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

/// Header carrying the shared access key.
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Shared-secret gate configuration.
///
/// A single plaintext key compared against the request header; on mismatch
/// every route behind the gate is blocked. Deliberately primitive: no
/// hashing, no sessions, no expiry.
#[derive(Clone)]
pub struct AccessState {
    pub key: String,
}

pub async fn access_middleware(
    State(state): State<AccessState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let presented = extract_key(req.headers())?;
    if presented != state.key {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(req).await)
}

fn extract_key(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(ACCESS_KEY_HEADER)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let key = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?.trim();
    if key.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(key)
}
