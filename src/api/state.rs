//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{AuthService, CustomerService, ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Customer service
    pub customer_service: Arc<dyn CustomerService>,
    /// Database connection; `None` when serving from the in-memory store
    pub database: Option<Arc<Database>>,
    /// Runtime configuration (CORS lists are read when building the router)
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state backed by PostgreSQL.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config.clone());
        Self::from_services(&container, Some(database), config)
    }

    /// Create application state over a fresh in-memory store.
    pub fn in_memory(config: Config) -> Self {
        let container = Services::in_memory(config.clone());
        Self::from_services(&container, None, config)
    }

    /// Create application state from any service container.
    pub fn from_services(
        services: &dyn ServiceContainer,
        database: Option<Arc<Database>>,
        config: Config,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            customer_service: services.customers(),
            database,
            config: Arc::new(config),
        }
    }
}
