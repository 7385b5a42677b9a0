//! Customer repository for async database operations.
//!
//! Provides CRUD operations for the customers table using diesel_async.
//! Absence is reported as `None`/`false`; only storage failures are errors.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Customer, NewCustomer};

diesel::define_sql_function! {
    /// SQL `lower()`. SQLite folds ASCII letters only.
    fn lower(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Customer repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct CustomerRepository {
    pool: AsyncDbPool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Finds a customer by their ID.
    ///
    /// # Returns
    /// `Some(Customer)` if found, `None` otherwise
    pub async fn get_by_id(&self, customer_id: i32) -> AppResult<Option<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .find(customer_id)
            .select(Customer::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find customer by id"))
    }

    /// Finds a customer by name, ignoring case.
    ///
    /// Both sides are lower-cased by the database before comparing. Names are
    /// not unique: when several rows match, the one with the lowest id wins.
    ///
    /// # Returns
    /// `Some(Customer)` if any row matches, `None` otherwise
    pub async fn get_by_name(&self, customer_name: &str) -> AppResult<Option<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .filter(lower(name).eq(lower(customer_name)))
            .order(id.asc())
            .select(Customer::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find customer by name"))
    }

    /// Lists all customers, ordered by id.
    pub async fn list_all(&self) -> AppResult<Vec<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        customers
            .order(id.asc())
            .select(Customer::as_select())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list customers"))
    }

    /// Inserts a new customer unconditionally.
    ///
    /// No check is made for an existing customer with the same name.
    ///
    /// # Returns
    /// The created customer with its generated id
    pub async fn create(&self, customer_name: &str) -> AppResult<Customer> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(customers)
            .values(NewCustomer {
                name: customer_name,
            })
            .returning(Customer::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "create customer"))
    }

    /// Renames an existing customer.
    ///
    /// Loads the row for `customer.id`, overwrites its name and saves it.
    ///
    /// # Returns
    /// The refreshed customer, or `None` if no row has that id or the save
    /// did not affect exactly one row
    pub async fn update(&self, customer: &Customer) -> AppResult<Option<Customer>> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        let existing = customers
            .find(customer.id)
            .select(Customer::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find customer by id"))?;

        let Some(mut existing) = existing else {
            return Ok(None);
        };

        let affected = diesel::update(customers.find(existing.id))
            .set(name.eq(&customer.name))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update customer"))?;

        if affected != 1 {
            tracing::warn!(
                customer_id = existing.id,
                affected,
                "Customer update affected unexpected row count"
            );
            return Ok(None);
        }

        existing.name.clone_from(&customer.name);
        Ok(Some(existing))
    }

    /// Deletes a customer by id.
    ///
    /// # Returns
    /// `true` only if the customer existed and exactly one row was removed
    pub async fn delete(&self, customer_id: i32) -> AppResult<bool> {
        use crate::schema::customers::dsl::*;
        let mut conn = self.pool.get().await?;

        let existing = customers
            .find(customer_id)
            .select(Customer::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "find customer by id"))?;

        if existing.is_none() {
            return Ok(false);
        }

        let affected = diesel::delete(customers.find(customer_id))
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete customer"))?;

        if affected != 1 {
            tracing::warn!(
                customer_id,
                affected,
                "Customer delete affected unexpected row count"
            );
        }

        Ok(affected == 1)
    }
}
