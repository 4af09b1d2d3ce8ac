use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth;
use crate::error::ApiError;
use crate::policy::Actor;

/// JWT authentication middleware: validates the bearer token and injects the
/// resolved [`Actor`] into the request. Unrecognized roles still pass through
/// as [`Actor::Unknown`]; the policy engine degrades them to empty reads and
/// denied writes rather than rejecting here.
pub async fn actor_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&headers).map_err(unauthorized)?;
    let claims = auth::validate_jwt(&token).map_err(|e| unauthorized(e.to_string()))?;

    let actor = Actor::from_claims(&claims);
    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

fn unauthorized(msg: String) -> Response {
    ApiError::unauthorized(msg).into_response()
}
