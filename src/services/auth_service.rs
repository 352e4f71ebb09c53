//! Authentication service - Credential checks and JWT handling.
//!
//! Customers log in with their email as username. Tokens carry the email as
//! subject and the customer's authorities in the `scopes` claim.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::Config;
use crate::domain::{Customer, CustomerDto, PasswordEncoder};
use crate::errors::{AppError, AppResult};
use crate::infra::CustomerRepository;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Customer email
    pub sub: String,
    pub scopes: Vec<String>,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthenticationRequest {
    /// Customer email
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "email@example.com")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "password")]
    pub password: String,
}

/// Login response: a bearer token plus the authenticated customer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticationResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub customer: CustomerDto,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a token
    async fn login(&self, request: AuthenticationRequest) -> AppResult<AuthenticationResponse>;

    /// Resolve the customer behind a username (email)
    async fn load_customer_by_username(&self, username: &str) -> AppResult<Customer>;

    /// Sign a token for `subject` carrying `roles`
    fn issue_token(&self, subject: &str, roles: &[String]) -> AppResult<String>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Plaintext hashed once and checked against when the username is unknown,
/// so failed logins cost the same whether or not the customer exists.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

/// Concrete implementation of AuthService.
pub struct Authenticator {
    repo: Arc<dyn CustomerRepository>,
    encoder: Arc<dyn PasswordEncoder>,
    config: Config,
    dummy_hash: OnceLock<String>,
}

impl Authenticator {
    pub fn new(
        repo: Arc<dyn CustomerRepository>,
        encoder: Arc<dyn PasswordEncoder>,
        config: Config,
    ) -> Self {
        Self {
            repo,
            encoder,
            config,
            dummy_hash: OnceLock::new(),
        }
    }

    fn dummy_hash(&self) -> &str {
        self.dummy_hash
            .get_or_init(|| self.encoder.encode(DUMMY_PASSWORD).unwrap_or_default())
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.config.jwt_issuer.as_str()]);
        validation
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, request: AuthenticationRequest) -> AppResult<AuthenticationResponse> {
        let customer = match self.load_customer_by_username(&request.username).await {
            Ok(customer) => customer,
            Err(AppError::UsernameNotFound(msg)) => {
                let _ = self.encoder.matches(&request.password, self.dummy_hash());
                tracing::debug!("{}", msg);
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self
            .encoder
            .matches(&request.password, &customer.password_hash)
        {
            tracing::debug!(customer_id = customer.id, "Login failed, wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.issue_token(customer.username(), &customer.roles())?;
        tracing::info!(customer_id = customer.id, "Customer logged in");

        Ok(AuthenticationResponse {
            token,
            customer: CustomerDto::from(customer),
        })
    }

    async fn load_customer_by_username(&self, username: &str) -> AppResult<Customer> {
        self.repo
            .find_by_email(username)
            .await?
            .ok_or_else(|| AppError::username_not_found(username))
    }

    fn issue_token(&self, subject: &str, roles: &[String]) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = Duration::try_hours(self.config.jwt_expiration_hours)
            .filter(|lifetime| *lifetime > Duration::zero())
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Invalid JWT lifetime of {} hours",
                    self.config.jwt_expiration_hours
                ))
            })?;

        let claims = Claims {
            sub: subject.to_string(),
            scopes: roles.to_vec(),
            iss: self.config.jwt_issuer.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(token)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &self.validation(),
        )?;

        Ok(token_data.claims)
    }
}
