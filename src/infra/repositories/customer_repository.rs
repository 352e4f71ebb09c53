//! Customer repository backed by PostgreSQL through SeaORM.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::customer::{self, ActiveModel, Entity as CustomerEntity};
use crate::domain::{Customer, NewCustomer};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Customer repository trait for dependency injection.
///
/// Implementations own persistence; uniqueness rules are enforced by the
/// service before it calls `insert` or `update`.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Check whether any customer uses this email
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;

    /// Check whether a customer with this id exists
    async fn exists_by_id(&self, id: i32) -> AppResult<bool>;

    /// Find customer by id
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>>;

    /// Find customer by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>>;

    /// List every customer, ordered by id
    async fn find_all(&self) -> AppResult<Vec<Customer>>;

    /// Persist a new customer; the store assigns the id
    async fn insert(&self, customer: NewCustomer) -> AppResult<()>;

    /// Overwrite name, email, age and gender of an existing customer
    async fn update(&self, customer: Customer) -> AppResult<()>;

    /// Remove a customer permanently
    async fn delete_by_id(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of CustomerRepository over a SeaORM connection
pub struct CustomerStore {
    db: DatabaseConnection,
}

impl CustomerStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for CustomerStore {
    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let count = CustomerEntity::find()
            .filter(customer::Column::Email.eq(email))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    async fn exists_by_id(&self, id: i32) -> AppResult<bool> {
        let count = CustomerEntity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let result = CustomerEntity::find()
            .filter(customer::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Customer::from))
    }

    async fn find_all(&self) -> AppResult<Vec<Customer>> {
        let models = CustomerEntity::find()
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Customer::from).collect())
    }

    async fn insert(&self, customer: NewCustomer) -> AppResult<()> {
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(customer.name),
            email: Set(customer.email),
            password: Set(customer.password_hash),
            age: Set(customer.age),
            gender: Set(customer.gender),
        };

        active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(())
    }

    async fn update(&self, customer: Customer) -> AppResult<()> {
        let id = customer.id;
        // Password column is left out of the UPDATE statement
        let active_model = ActiveModel {
            id: Set(id),
            name: Set(customer.name),
            email: Set(customer.email),
            password: NotSet,
            age: Set(customer.age),
            gender: Set(customer.gender),
        };

        match active_model.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(AppError::customer_not_found(id)),
            Err(e) => Err(AppError::from(e)),
        }
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<()> {
        let result = CustomerEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::customer_not_found(id));
        }

        Ok(())
    }
}
