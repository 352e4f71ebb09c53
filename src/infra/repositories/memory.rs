//! In-process customer repository.
//!
//! Used by `serve --store memory` for local runs without PostgreSQL and by
//! the HTTP integration tests. Ids are assigned sequentially from 1, and the
//! unique-email constraint of the `customer` table is enforced here too.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CustomerRepository;
use crate::domain::{Customer, NewCustomer};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Customer>,
}

impl Table {
    fn email_in_use(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|c| c.email == email && Some(c.id) != except)
    }
}

/// Customer repository holding rows in memory
#[derive(Default)]
pub struct InMemoryCustomerStore {
    table: RwLock<Table>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored customers.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerStore {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        Ok(self.table.read().await.email_in_use(email, None))
    }

    async fn exists_by_id(&self, id: i32) -> AppResult<bool> {
        Ok(self.table.read().await.rows.contains_key(&id))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|c| c.email == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Customer>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn insert(&self, customer: NewCustomer) -> AppResult<()> {
        let mut table = self.table.write().await;
        if table.email_in_use(&customer.email, None) {
            return Err(AppError::email_taken());
        }

        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            Customer {
                id,
                name: customer.name,
                email: customer.email,
                password_hash: customer.password_hash,
                age: customer.age,
                gender: customer.gender,
            },
        );
        Ok(())
    }

    async fn update(&self, customer: Customer) -> AppResult<()> {
        let mut table = self.table.write().await;
        if table.email_in_use(&customer.email, Some(customer.id)) {
            return Err(AppError::email_taken());
        }

        let row = table
            .rows
            .get_mut(&customer.id)
            .ok_or_else(|| AppError::customer_not_found(customer.id))?;

        row.name = customer.name;
        row.email = customer.email;
        row.age = customer.age;
        row.gender = customer.gender;
        Ok(())
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::customer_not_found(id))
    }
}
