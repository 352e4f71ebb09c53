//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod customer_repository;
pub(crate) mod entities;
mod memory;

pub use customer_repository::{CustomerRepository, CustomerStore};
pub use memory::InMemoryCustomerStore;

// Export mock for unit tests
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
