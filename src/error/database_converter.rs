use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Utility for converting Diesel errors into `AppError::Database`.
///
/// Every Diesel failure reaching this converter is unexpected: absence is
/// handled with `.optional()` before it gets here. The converter only
/// attaches a readable description of what went wrong.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an `AppError`.
    ///
    /// # Arguments
    /// * `error` - The Diesel error to convert
    /// * `operation` - Description of the database operation that failed
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!(
                    "{}: {}",
                    Self::describe_kind(&kind),
                    info.message()
                )),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn describe_kind(kind: &DatabaseErrorKind) -> &'static str {
        match kind {
            DatabaseErrorKind::UniqueViolation => "Unique constraint violation",
            DatabaseErrorKind::NotNullViolation => "Not null constraint violation",
            DatabaseErrorKind::ForeignKeyViolation => "Foreign key constraint violation",
            DatabaseErrorKind::CheckViolation => "Check constraint violation",
            DatabaseErrorKind::ReadOnlyTransaction => "Database is read-only",
            DatabaseErrorKind::ClosedConnection => "Connection closed",
            _ => "Database error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            None
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    #[test]
    fn test_convert_not_null_violation() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::NotNullViolation,
            Box::new(MockDatabaseErrorInfo {
                message: "NOT NULL constraint failed: customers.name".to_string(),
            }),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "create customer") {
            AppError::Database { operation, source } => {
                assert_eq!(operation, "create customer");
                let message = source.to_string();
                assert!(message.starts_with("Not null constraint violation"));
                assert!(message.contains("customers.name"));
            }
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_other_error_keeps_source() {
        let error = DieselError::RollbackTransaction;

        match DatabaseErrorConverter::convert_diesel_error(error, "delete customer") {
            AppError::Database { operation, .. } => assert_eq!(operation, "delete customer"),
            other => panic!("Expected Database error, got {:?}", other),
        }
    }
}
