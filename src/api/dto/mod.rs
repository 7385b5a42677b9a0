//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `customer` - Customer request/response DTOs and query parameters
//! - `error` - Common error response DTOs

mod customer;
mod error;

pub use customer::{CustomerQuery, CustomerRequest, CustomerResponse};
pub use error::ErrorResponse;
