//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for the customer table.

mod customer_repo;

pub use customer_repo::CustomerRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub customers: CustomerRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            customers: CustomerRepository::new(pool),
        }
    }
}
