//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod auth_service;
pub mod container;
mod customer_service;

// Service Container
pub use container::{ServiceContainer, Services};

#[cfg(test)]
pub use container::MockServiceContainer;

// Service traits and implementations
pub use auth_service::{
    AuthService, AuthenticationRequest, AuthenticationResponse, Authenticator, Claims,
};
pub use customer_service::{CustomerManager, CustomerService};
