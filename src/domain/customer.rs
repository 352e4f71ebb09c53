//! Customer domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::config::ROLE_USER;

/// Customer domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub gender: bool,
}

impl Customer {
    /// Authorities granted to this customer.
    pub fn roles(&self) -> Vec<String> {
        vec![ROLE_USER.to_string()]
    }

    /// Name the customer authenticates with.
    pub fn username(&self) -> &str {
        &self.email
    }
}

/// A customer that has not been persisted yet; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub gender: bool,
}

/// Customer registration request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CustomerRegistrationRequest {
    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "hossein")]
    pub name: String,
    /// Email address, also used as the login username
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "email@example.com")]
    pub email: String,
    /// Plaintext password (minimum 8 characters)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    #[schema(example = "password", min_length = 8)]
    pub password: String,
    #[validate(range(min = 0, message = "Age cannot be negative"))]
    #[schema(example = 19)]
    pub age: i32,
    #[schema(example = true)]
    pub gender: bool,
}

/// Customer update request.
///
/// Absent fields are left as they are; present fields are only applied when
/// they differ from the stored value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct CustomerUpdateRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "hosi")]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "newEmail@example.com")]
    pub email: Option<String>,
    #[validate(range(min = 0, message = "Age cannot be negative"))]
    #[schema(example = 21)]
    pub age: Option<i32>,
    #[schema(example = false)]
    pub gender: Option<bool>,
}

impl CustomerUpdateRequest {
    /// Request carrying every field, as the frontend form sends it.
    pub fn full(name: impl Into<String>, email: impl Into<String>, age: i32, gender: bool) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            age: Some(age),
            gender: Some(gender),
        }
    }
}

/// Customer projection returned to clients (never carries the password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerDto {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "hossein")]
    pub name: String,
    #[schema(example = "email@example.com")]
    pub email: String,
    #[schema(example = true)]
    pub gender: bool,
    #[schema(example = 19)]
    pub age: i32,
    /// Granted authorities
    #[schema(example = json!(["ROLE_USER"]))]
    pub roles: Vec<String>,
    /// Login name (the email)
    #[schema(example = "email@example.com")]
    pub username: String,
}

impl From<&Customer> for CustomerDto {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            email: customer.email.clone(),
            gender: customer.gender,
            age: customer.age,
            roles: customer.roles(),
            username: customer.username().to_string(),
        }
    }
}

impl From<Customer> for CustomerDto {
    fn from(customer: Customer) -> Self {
        Self::from(&customer)
    }
}
