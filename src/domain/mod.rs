//! Domain layer - Core business entities and logic
//!
//! This module contains the customer model and the password encoding
//! contract, independent of HTTP and persistence concerns.

pub mod customer;
pub mod password;

pub use customer::{
    Customer, CustomerDto, CustomerRegistrationRequest, CustomerUpdateRequest, NewCustomer,
};
pub use password::{Argon2Encoder, PasswordEncoder};

#[cfg(test)]
pub use password::MockPasswordEncoder;
