use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{issue_token, TokenIssueError};
use crate::config;
use crate::database::models::User;
use crate::database::repository::{NewUser, RepoError, UserRepository};

#[derive(Debug, Error)]
pub enum UserServiceError {
    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Credential error: {0}")]
    Credential(String),

    #[error(transparent)]
    Token(#[from] TokenIssueError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Registration fields, already shape-validated at the boundary.
/// The password arrives in plain text and is hashed here.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
}

/// A freshly-authenticated user and their bearer token
#[derive(Debug, Clone)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Register a new user and issue their first token
    pub async fn register(&self, input: RegisterInput) -> Result<AuthPayload, UserServiceError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(UserServiceError::EmailTaken);
        }

        let security = &config::config().security;
        let password_hash =
            hash_password(&input.password, security.bcrypt_cost).map_err(UserServiceError::Credential)?;

        let user = match self
            .users
            .insert(NewUser {
                full_name: input.full_name,
                email: input.email,
                password_hash,
                phone_number: input.phone_number,
                address: input.address,
                image: input.image,
            })
            .await
        {
            Ok(user) => user,
            // The pre-check above races with concurrent registrations; the
            // repository's uniqueness guarantee is authoritative
            Err(RepoError::Duplicate(_)) => return Err(UserServiceError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        let token = issue_token(&user, &security.jwt_secret, security.jwt_expiry_hours)?;
        tracing::info!(user_id = %user.id, "registered new user");

        Ok(AuthPayload { user, token })
    }

    /// Authenticate by email and password. Unknown email and wrong password
    /// produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, UserServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(UserServiceError::InvalidCredentials)?;

        let matches =
            verify_password(password, &user.password_hash).map_err(UserServiceError::Credential)?;
        if !matches {
            return Err(UserServiceError::InvalidCredentials);
        }

        let security = &config::config().security;
        let token = issue_token(&user, &security.jwt_secret, security.jwt_expiry_hours)?;

        Ok(AuthPayload { user, token })
    }

    /// Directory lookup used by the authorization guard
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        self.users.find_by_id(id).await
    }
}
