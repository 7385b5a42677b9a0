//! Customer service for business logic operations.
//!
//! Shapes requests and responses around the repository and owns the
//! get-or-create policy. A missing customer is reported as
//! `CustomerResponse::empty()` (id 0), never as an error.

use crate::api::dto::{CustomerRequest, CustomerResponse};
use crate::error::AppResult;
use crate::repositories::CustomerRepository;

/// Which key a customer lookup resolves against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerLookup {
    ById(i32),
    ByName(String),
}

impl From<&CustomerRequest> for CustomerLookup {
    /// A positive id takes priority over the name.
    fn from(request: &CustomerRequest) -> Self {
        if request.id > 0 {
            CustomerLookup::ById(request.id)
        } else {
            CustomerLookup::ByName(request.name.clone())
        }
    }
}

/// Customer service wrapping the `CustomerRepository`.
///
/// Cloning is cheap; the repository only holds the pool handle.
#[derive(Clone)]
pub struct CustomerService {
    repo: CustomerRepository,
}

impl CustomerService {
    /// Creates a new CustomerService with the given repository.
    pub fn new(repo: CustomerRepository) -> Self {
        Self { repo }
    }

    /// Gets a customer by id or by name.
    ///
    /// # Returns
    /// The customer, or the empty response (id 0) if nothing matched
    pub async fn get(&self, request: &CustomerRequest) -> AppResult<CustomerResponse> {
        let customer = match CustomerLookup::from(request) {
            CustomerLookup::ById(id) => self.repo.get_by_id(id).await?,
            CustomerLookup::ByName(name) => self.repo.get_by_name(&name).await?,
        };

        Ok(customer
            .map(CustomerResponse::from)
            .unwrap_or_else(CustomerResponse::empty))
    }

    /// Lists all customers.
    pub async fn list_all(&self) -> AppResult<Vec<CustomerResponse>> {
        let customers = self.repo.list_all().await?;
        Ok(customers.into_iter().map(CustomerResponse::from).collect())
    }

    /// Returns the customer with this name, creating it first if none exists.
    ///
    /// The lookup and the insert are separate statements: two concurrent
    /// calls for the same new name can both miss and both insert.
    pub async fn create(&self, name: &str) -> AppResult<CustomerResponse> {
        let customer = match self.repo.get_by_name(name).await? {
            Some(existing) => {
                tracing::debug!(customer_id = existing.id, "Customer already exists, reusing");
                existing
            }
            None => {
                let created = self.repo.create(name).await?;
                tracing::info!(customer_id = created.id, "Customer created");
                created
            }
        };

        Ok(CustomerResponse::from(customer))
    }

    /// Renames the customer identified by `request.id`.
    ///
    /// # Returns
    /// The updated customer, or the empty response (id 0) if it does not exist
    pub async fn update(&self, request: CustomerRequest) -> AppResult<CustomerResponse> {
        let customer = request.into_customer();

        Ok(self
            .repo
            .update(&customer)
            .await?
            .map(CustomerResponse::from)
            .unwrap_or_else(CustomerResponse::empty))
    }

    /// Deletes a customer.
    ///
    /// # Returns
    /// `true` if the customer was deleted, `false` if not found
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(customer_id = id, "Customer deleted");
        }
        Ok(deleted)
    }
}
