//! Customer-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::models::Customer;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for renaming a customer, also used internally for lookups.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CustomerRequest {
    #[validate(range(min = 1, message = "Id must be a positive integer"))]
    #[schema(minimum = 1, example = 1)]
    pub id: i32,
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Alicia")]
    pub name: String,
}

impl CustomerRequest {
    /// Lookup request keyed by id.
    pub fn by_id(id: i32) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }

    /// Lookup request keyed by name.
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }

    /// Converts the request DTO into a Customer model for the repository.
    pub fn into_customer(self) -> Customer {
        Customer {
            id: self.id,
            name: self.name,
        }
    }
}

/// Query parameters accepted by `/api/customers`.
///
/// `GET` honors `id` first, then `name`, and lists everything when neither is
/// given. `POST` reads `name`, `DELETE` reads `id`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerQuery {
    /// Customer id, must be positive
    pub id: Option<i32>,
    /// Customer name, matched without regard to case
    pub name: Option<String>,
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Response body for customer data.
///
/// An `id` of 0 with no name means no customer matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub name: Option<String>,
}

impl CustomerResponse {
    /// The "no such customer" response.
    pub fn empty() -> Self {
        Self { id: 0, name: None }
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0
    }
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: Some(customer.name),
        }
    }
}

/// Rejects empty and whitespace-only strings.
pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Name must not be blank".into()));
    }
    Ok(())
}
