//! Service Container - Wires repositories and encoders into services.
//!
//! Handlers reach services through [`ServiceContainer`] so the backing
//! store (PostgreSQL or in-memory) is chosen in one place.

use std::sync::Arc;

use super::{AuthService, Authenticator, CustomerManager, CustomerService};
use crate::config::Config;
use crate::domain::{Argon2Encoder, PasswordEncoder};
use crate::infra::{CustomerRepository, CustomerStore, InMemoryCustomerStore};

#[cfg(test)]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(test, automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get customer service
    fn customers(&self) -> Arc<dyn CustomerService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    customer_service: Arc<dyn CustomerService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        customer_service: Arc<dyn CustomerService>,
    ) -> Self {
        Self {
            auth_service,
            customer_service,
        }
    }

    /// Build both services over one repository and encoder
    pub fn from_parts(
        repo: Arc<dyn CustomerRepository>,
        encoder: Arc<dyn PasswordEncoder>,
        config: Config,
    ) -> Self {
        let auth_service = Arc::new(Authenticator::new(
            repo.clone(),
            encoder.clone(),
            config,
        ));
        let customer_service = Arc::new(CustomerManager::new(repo, encoder));

        Self::new(auth_service, customer_service)
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        Self::from_parts(
            Arc::new(CustomerStore::new(db)),
            Arc::new(Argon2Encoder::new()),
            config,
        )
    }

    /// Create service container over an empty in-memory store
    pub fn in_memory(config: Config) -> Self {
        Self::from_parts(
            Arc::new(InMemoryCustomerStore::new()),
            Arc::new(Argon2Encoder::new()),
            config,
        )
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn customers(&self) -> Arc<dyn CustomerService> {
        self.customer_service.clone()
    }
}
