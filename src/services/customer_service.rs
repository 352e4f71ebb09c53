//! Customer service - Registration, lookup, diff-based update and deletion.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    CustomerDto, CustomerRegistrationRequest, CustomerUpdateRequest, NewCustomer, PasswordEncoder,
};
use crate::errors::{AppError, AppResult};
use crate::infra::CustomerRepository;

/// Customer service trait for dependency injection.
#[async_trait]
pub trait CustomerService: Send + Sync {
    /// Register a customer; the email must not be in use yet
    async fn add_customer(&self, request: CustomerRegistrationRequest) -> AppResult<()>;

    /// List all customers
    async fn get_all_customers(&self) -> AppResult<Vec<CustomerDto>>;

    /// Get a single customer
    async fn get_customer_by_id(&self, id: i32) -> AppResult<CustomerDto>;

    /// Delete a customer
    async fn delete_customer(&self, id: i32) -> AppResult<()>;

    /// Apply the fields of `request` that differ from the stored customer.
    ///
    /// Fails with `RequestValidation` when nothing would change.
    async fn update_customer(
        &self,
        request: CustomerUpdateRequest,
        id: i32,
    ) -> AppResult<CustomerDto>;
}

/// Concrete implementation of CustomerService over a repository and encoder.
pub struct CustomerManager {
    repo: Arc<dyn CustomerRepository>,
    encoder: Arc<dyn PasswordEncoder>,
}

impl CustomerManager {
    pub fn new(repo: Arc<dyn CustomerRepository>, encoder: Arc<dyn PasswordEncoder>) -> Self {
        Self { repo, encoder }
    }
}

#[async_trait]
impl CustomerService for CustomerManager {
    async fn add_customer(&self, request: CustomerRegistrationRequest) -> AppResult<()> {
        if self.repo.exists_by_email(&request.email).await? {
            tracing::debug!("Registration rejected, email already in use");
            return Err(AppError::email_taken());
        }

        let customer = NewCustomer {
            password_hash: self.encoder.encode(&request.password)?,
            name: request.name,
            email: request.email,
            age: request.age,
            gender: request.gender,
        };

        self.repo.insert(customer).await?;
        tracing::info!("Customer registered");
        Ok(())
    }

    async fn get_all_customers(&self) -> AppResult<Vec<CustomerDto>> {
        let customers = self.repo.find_all().await?;
        Ok(customers.iter().map(CustomerDto::from).collect())
    }

    async fn get_customer_by_id(&self, id: i32) -> AppResult<CustomerDto> {
        self.repo
            .find_by_id(id)
            .await?
            .map(CustomerDto::from)
            .ok_or_else(|| AppError::customer_not_found(id))
    }

    async fn delete_customer(&self, id: i32) -> AppResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::customer_not_found(id));
        }

        self.repo.delete_by_id(id).await?;
        tracing::info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    async fn update_customer(
        &self,
        request: CustomerUpdateRequest,
        id: i32,
    ) -> AppResult<CustomerDto> {
        let mut customer = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::customer_not_found(id))?;

        let mut changed = false;

        if let Some(name) = request.name.filter(|n| *n != customer.name) {
            customer.name = name;
            changed = true;
        }

        if let Some(email) = request.email.filter(|e| *e != customer.email) {
            if self.repo.exists_by_email(&email).await? {
                return Err(AppError::email_taken());
            }
            customer.email = email;
            changed = true;
        }

        if let Some(age) = request.age.filter(|a| *a != customer.age) {
            customer.age = age;
            changed = true;
        }

        if let Some(gender) = request.gender.filter(|g| *g != customer.gender) {
            customer.gender = gender;
            changed = true;
        }

        if !changed {
            tracing::debug!(customer_id = id, "Update rejected, no field changed");
            return Err(AppError::no_changes());
        }

        let dto = CustomerDto::from(&customer);
        self.repo.update(customer).await?;
        tracing::info!(customer_id = id, "Customer updated");

        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::domain::{Customer, MockPasswordEncoder};
    use crate::infra::MockCustomerRepository;

    const PASSWORD_HASH: &str = "!@%@456489$654654^4654%64&64@6$6@6$6&";

    fn existing(id: i32, email: &str) -> Customer {
        Customer {
            id,
            name: "hossein".to_string(),
            email: email.to_string(),
            password_hash: "password".to_string(),
            age: 12,
            gender: true,
        }
    }

    fn manager(repo: MockCustomerRepository, encoder: MockPasswordEncoder) -> CustomerManager {
        CustomerManager::new(Arc::new(repo), Arc::new(encoder))
    }

    /// Repository that returns `customer` for its id and records what `update` receives.
    fn repo_with(customer: Customer) -> (MockCustomerRepository, Arc<Mutex<Option<Customer>>>) {
        let captured = Arc::new(Mutex::new(None));
        let sink = captured.clone();
        let id = customer.id;

        let mut repo = MockCustomerRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(customer.clone())));
        repo.expect_update().times(0..=1).returning(move |c| {
            *sink.lock().unwrap() = Some(c);
            Ok(())
        });

        (repo, captured)
    }

    fn registration(email: &str) -> CustomerRegistrationRequest {
        CustomerRegistrationRequest {
            name: "hossein".to_string(),
            email: email.to_string(),
            password: "password".to_string(),
            age: 19,
            gender: true,
        }
    }

    #[tokio::test]
    async fn test_add_customer_hashes_password() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_exists_by_email()
            .withf(|email| email == "email@example.com")
            .returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|c| {
                c.name == "hossein"
                    && c.email == "email@example.com"
                    && c.age == 19
                    && c.gender
                    && c.password_hash == PASSWORD_HASH
            })
            .times(1)
            .returning(|_| Ok(()));

        let mut encoder = MockPasswordEncoder::new();
        encoder
            .expect_encode()
            .withf(|raw| raw == "password")
            .returning(|_| Ok(PASSWORD_HASH.to_string()));

        let service = manager(repo, encoder);
        assert_ok!(service.add_customer(registration("email@example.com")).await);
    }

    #[tokio::test]
    async fn test_add_customer_rejects_taken_email() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_insert().never();

        let mut encoder = MockPasswordEncoder::new();
        encoder.expect_encode().never();

        let service = manager(repo, encoder);
        let err = assert_err!(service.add_customer(registration("email@example.com")).await);

        assert!(matches!(err, AppError::DuplicateResource(_)));
        assert_eq!(err.to_string(), "email already exists.");
    }

    #[tokio::test]
    async fn test_get_all_customers_projects_every_row() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_find_all().times(1).returning(|| {
            Ok(vec![
                existing(1, "one@example.com"),
                existing(2, "two@example.com"),
            ])
        });

        let service = manager(repo, MockPasswordEncoder::new());
        let customers = service.get_all_customers().await.unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[1].username, "two@example.com");
    }

    #[tokio::test]
    async fn test_get_customer_by_id() {
        let customer = existing(1, "email");
        let expected = CustomerDto::from(&customer);

        let mut repo = MockCustomerRepository::new();
        repo.expect_find_by_id()
            .with(eq(1))
            .returning(move |_| Ok(Some(customer.clone())));

        let service = manager(repo, MockPasswordEncoder::new());
        assert_eq!(service.get_customer_by_id(1).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn test_get_customer_by_id_not_found() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = manager(repo, MockPasswordEncoder::new());
        let err = service.get_customer_by_id(1).await.unwrap_err();

        assert_eq!(err.to_string(), "customer with the id: [1] was not found!");
    }

    #[tokio::test]
    async fn test_delete_customer() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_exists_by_id().with(eq(1)).returning(|_| Ok(true));
        repo.expect_delete_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = manager(repo, MockPasswordEncoder::new());
        assert_ok!(service.delete_customer(1).await);
    }

    #[tokio::test]
    async fn test_delete_missing_customer() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_exists_by_id().returning(|_| Ok(false));
        repo.expect_delete_by_id().never();

        let service = manager(repo, MockPasswordEncoder::new());
        let err = assert_err!(service.delete_customer(1).await);

        assert!(matches!(err, AppError::ResourceNotFound(_)));
        assert_eq!(err.to_string(), "customer with the id: [1] was not found!");
    }

    #[tokio::test]
    async fn test_update_missing_customer() {
        let mut repo = MockCustomerRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("hossein", "email", 19, true);
        let err = assert_err!(service.update_customer(request, 1).await);

        assert!(matches!(err, AppError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected() {
        let (repo, captured) = repo_with(existing(1, "email@example.com"));

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("hossein", "email@example.com", 12, true);
        let err = assert_err!(service.update_customer(request, 1).await);

        assert!(matches!(err, AppError::RequestValidation(_)));
        assert_eq!(err.to_string(), "there were no changes.");
        assert!(captured.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_with_empty_request_is_rejected() {
        let (repo, captured) = repo_with(existing(1, "email@example.com"));

        let service = manager(repo, MockPasswordEncoder::new());
        let err = assert_err!(
            service
                .update_customer(CustomerUpdateRequest::default(), 1)
                .await
        );

        assert!(matches!(err, AppError::RequestValidation(_)));
        assert!(captured.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_only_email() {
        let (mut repo, captured) = repo_with(existing(1, "email@example.com"));
        repo.expect_exists_by_email()
            .withf(|email| email == "newEmail@example.com")
            .returning(|_| Ok(false));

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("hossein", "newEmail@example.com", 12, true);
        let dto = service.update_customer(request, 1).await.unwrap();

        let persisted = captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            persisted,
            Customer {
                email: "newEmail@example.com".to_string(),
                ..existing(1, "email@example.com")
            }
        );
        assert_eq!(dto.username, "newEmail@example.com");
    }

    #[tokio::test]
    async fn test_update_with_taken_email_is_rejected() {
        let (mut repo, captured) = repo_with(existing(1, "email@example.com"));
        repo.expect_exists_by_email().returning(|_| Ok(true));

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("hossein", "newEmail@example.com", 12, true);
        let err = assert_err!(service.update_customer(request, 1).await);

        assert!(matches!(err, AppError::DuplicateResource(_)));
        assert_eq!(err.to_string(), "email already exists.");
        assert!(captured.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_only_name() {
        let (mut repo, captured) = repo_with(existing(1, "email@example.com"));
        repo.expect_exists_by_email().never();

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("hosi", "email@example.com", 12, true);
        assert_ok!(service.update_customer(request, 1).await);

        let persisted = captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            persisted,
            Customer {
                name: "hosi".to_string(),
                ..existing(1, "email@example.com")
            }
        );
    }

    #[tokio::test]
    async fn test_update_only_age() {
        let (repo, captured) = repo_with(existing(1, "email@example.com"));

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("hossein", "email@example.com", 155, true);
        assert_ok!(service.update_customer(request, 1).await);

        let persisted = captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            persisted,
            Customer {
                age: 155,
                ..existing(1, "email@example.com")
            }
        );
    }

    #[tokio::test]
    async fn test_update_only_gender() {
        let (repo, captured) = repo_with(existing(1, "email@example.com"));

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("hossein", "email@example.com", 12, false);
        assert_ok!(service.update_customer(request, 1).await);

        let persisted = captured.lock().unwrap().clone().unwrap();
        assert_eq!(
            persisted,
            Customer {
                gender: false,
                ..existing(1, "email@example.com")
            }
        );
    }

    #[tokio::test]
    async fn test_partial_request_touches_only_given_field() {
        let (repo, captured) = repo_with(existing(1, "email@example.com"));

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest {
            age: Some(30),
            ..Default::default()
        };
        assert_ok!(service.update_customer(request, 1).await);

        let persisted = captured.lock().unwrap().clone().unwrap();
        assert_eq!(persisted.age, 30);
        assert_eq!(persisted.name, "hossein");
        assert_eq!(persisted.password_hash, "password");
    }

    #[tokio::test]
    async fn test_update_all_properties() {
        let (mut repo, captured) = repo_with(Customer {
            name: "name".to_string(),
            age: 21,
            ..existing(1, "email")
        });
        repo.expect_exists_by_email()
            .withf(|email| email == "newEmail")
            .returning(|_| Ok(false));

        let service = manager(repo, MockPasswordEncoder::new());
        let request = CustomerUpdateRequest::full("newName", "newEmail", 123, false);
        assert_ok!(service.update_customer(request, 1).await);

        let persisted = captured.lock().unwrap().clone().unwrap();
        assert_eq!(persisted.id, 1);
        assert_eq!(persisted.name, "newName");
        assert_eq!(persisted.email, "newEmail");
        assert_eq!(persisted.age, 123);
        assert!(!persisted.gender);
    }
}
