use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use super::validate::{require_string, validate_email_format, validate_max_length};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::services::RegisterInput;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
}

impl RegisterRequest {
    fn validate(self) -> Result<RegisterInput, HashMap<String, String>> {
        let mut errors = HashMap::new();

        let full_name = match require_string(&self.full_name, "full name") {
            Ok(v) => {
                if let Err(msg) = validate_max_length(&v, 255, "full name") {
                    errors.insert("full_name".to_string(), msg);
                }
                v
            }
            Err(msg) => {
                errors.insert("full_name".to_string(), msg);
                String::new()
            }
        };

        let email = match require_string(&self.email, "email") {
            Ok(v) => {
                if let Err(msg) = validate_email_format(&v) {
                    errors.insert("email".to_string(), msg);
                } else if let Err(msg) = validate_max_length(&v, 255, "email") {
                    errors.insert("email".to_string(), msg);
                }
                v
            }
            Err(msg) => {
                errors.insert("email".to_string(), msg);
                String::new()
            }
        };

        let password = match require_string(&self.password, "password") {
            Ok(v) => {
                if v.len() < 8 {
                    errors.insert(
                        "password".to_string(),
                        "The password must be at least 8 characters".to_string(),
                    );
                } else if self.password_confirmation.as_deref() != Some(v.as_str()) {
                    errors.insert(
                        "password".to_string(),
                        "The password confirmation does not match".to_string(),
                    );
                }
                v
            }
            Err(msg) => {
                errors.insert("password".to_string(), msg);
                String::new()
            }
        };

        if let Some(phone) = &self.phone_number {
            if let Err(msg) = validate_max_length(phone, 20, "phone number") {
                errors.insert("phone_number".to_string(), msg);
            }
        }
        if let Some(address) = &self.address {
            if let Err(msg) = validate_max_length(address, 500, "address") {
                errors.insert("address".to_string(), msg);
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(RegisterInput {
            full_name,
            email,
            password,
            phone_number: self.phone_number,
            address: self.address,
            image: self.image,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    fn validate(self) -> Result<(String, String), HashMap<String, String>> {
        let mut errors = HashMap::new();

        let email = match require_string(&self.email, "email") {
            Ok(v) => {
                if let Err(msg) = validate_email_format(&v) {
                    errors.insert("email".to_string(), msg);
                }
                v
            }
            Err(msg) => {
                errors.insert("email".to_string(), msg);
                String::new()
            }
        };

        let password = match require_string(&self.password, "password") {
            Ok(v) => v,
            Err(msg) => {
                errors.insert("password".to_string(), msg);
                String::new()
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok((email, password))
    }
}

/// POST /auth/register - Create an account and receive a bearer token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Value> {
    let input = payload
        .validate()
        .map_err(|errors| ApiError::unprocessable_entity("Validation errors", errors))?;

    let auth = state.users.register(input).await?;

    Ok(ApiResponse::created(
        json!({ "user": auth.user, "token": auth.token }),
        "User registered successfully",
    ))
}

/// POST /auth/login - Authenticate and receive a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Value> {
    let (email, password) = payload
        .validate()
        .map_err(|errors| ApiError::unprocessable_entity("Validation errors", errors))?;

    let auth = state.users.login(&email, &password).await?;

    Ok(ApiResponse::with_message(
        json!({ "user": auth.user, "token": auth.token }),
        "Login successful",
    ))
}

/// GET /auth/me - The user resolved from the bearer token
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> ApiResponse<Value> {
    ApiResponse::success(json!({ "user": user }))
}
