use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;
use crate::database::models::User;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Owning user id
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &User, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user.id,
            email: user.email.clone(),
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenIssueError {
    #[error("JWT generation error: {0}")]
    Generation(String),
    #[error("JWT secret not configured")]
    MissingSecret,
}

/// Issue a signed bearer token for a user, using the configured secret and
/// expiry window. Side-effect free beyond the signature.
pub fn issue_token(user: &User, secret: &str, expiry_hours: u64) -> Result<String, TokenIssueError> {
    if secret.is_empty() {
        return Err(TokenIssueError::MissingSecret);
    }

    let claims = Claims::new(user, expiry_hours);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| TokenIssueError::Generation(e.to_string()))
}

/// Validate a bearer token and extract its claims.
///
/// Expiry is reported separately from structural/signature failures so the
/// boundary can log the difference; both are 401 to the client.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::Malformed);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    match decode::<Claims>(token, &decoding_key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(AuthError::Expired),
            _ => Err(AuthError::Malformed),
        },
    }
}
