//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Customer repositories (PostgreSQL and in-memory)

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{CustomerRepository, CustomerStore, InMemoryCustomerStore};

#[cfg(test)]
pub use repositories::MockCustomerRepository;
