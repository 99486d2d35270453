use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_token, AuthError};
use crate::config;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;

/// The requesting user, resolved once per request by the guard below.
/// Handlers take this extension; none of them ever see a raw token.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Authorization guard: translates the transport-level bearer token into a
/// domain identity. Token validation composes with a user directory lookup;
/// a token whose subject no longer resolves is rejected exactly like an
/// invalid token.
pub async fn require_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers)?;

    let claims = validate_token(&token, &config::config().security.jwt_secret).map_err(|e| {
        tracing::debug!("token rejected: {}", e);
        ApiError::from(e)
    })?;

    let user = state
        .users
        .find_by_id(claims.sub)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            tracing::warn!(user_id = %claims.sub, "token subject no longer resolves to a user");
            ApiError::from(AuthError::UserNotFound)
        })?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let auth_header = headers
        .get("authorization")
        .ok_or(AuthError::MissingToken)?;

    let auth_str = auth_header.to_str().map_err(|_| AuthError::MissingToken)?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        _ => Err(AuthError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_and_non_bearer_headers() {
        let headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), Err(AuthError::MissingToken));

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(extract_bearer_token(&headers), Err(AuthError::MissingToken));

        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), Err(AuthError::MissingToken));
    }
}
