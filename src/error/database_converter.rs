use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

use crate::error::{AppError, ConstraintParser};

/// Maps diesel errors onto [`AppError`] variants, turning constraint
/// violations into client-facing errors.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let constraint = info.constraint_name();

        let converted = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ConstraintParser::parse_unique_violation(message, constraint).map(
                    |(entity, field, value)| AppError::Duplicate {
                        entity,
                        field,
                        value,
                    },
                )
            }
            DatabaseErrorKind::NotNullViolation => {
                ConstraintParser::parse_not_null_violation(message, constraint).map(
                    |(entity, field)| {
                        AppError::validation(field, format!("Field is required for {entity}"))
                    },
                )
            }
            DatabaseErrorKind::ForeignKeyViolation => {
                ConstraintParser::parse_foreign_key_violation(message, constraint).map(
                    |(entity, field, value)| {
                        AppError::validation(
                            field,
                            format!("Invalid reference to {entity} with value '{value}'"),
                        )
                    },
                )
            }
            DatabaseErrorKind::CheckViolation => {
                ConstraintParser::parse_check_violation(message, constraint).map(
                    |(entity, field)| {
                        AppError::validation(
                            field,
                            format!("Check constraint failed for {entity}"),
                        )
                    },
                )
            }
            _ => None,
        };

        converted.unwrap_or_else(|| AppError::Database {
            operation: operation.to_string(),
            source: anyhow::anyhow!("{kind:?}: {message}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockInfo {
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
            self.constraint_name.as_deref()
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, message: &str, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockInfo {
                message: message.to_string(),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_not_found() {
        let err = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find");
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_unique_violation_becomes_duplicate() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint \"users_email_key\"\nDETAIL: Key (email)=(ana@example.com) already exists.",
            Some("users_email_key"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "insert user") {
            AppError::Duplicate {
                entity,
                field,
                value,
            } => {
                assert_eq!(entity, "users");
                assert_eq!(field, "email");
                assert_eq!(value, "ana@example.com");
            }
            other => panic!("expected Duplicate, got {other:?}"),
        }
    }

    #[test]
    fn test_foreign_key_violation_becomes_validation() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "insert or update on table \"group_members\" violates foreign key constraint \"group_members_user_id_fkey\"\nDETAIL: Key (user_id)=(77) is not present in table \"users\".",
            Some("group_members_user_id_fkey"),
        );

        match DatabaseErrorConverter::convert_diesel_error(error, "add member") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "user_id");
                assert!(reason.contains("users"));
                assert!(reason.contains("77"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_check_violation_becomes_validation() {
        let error = db_error(
            DatabaseErrorKind::CheckViolation,
            "new row for relation \"users\" violates check constraint \"users_coins_check\"",
            Some("users_coins_check"),
        );

        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "update coins"),
            AppError::Validation { field, .. } if field == "coins"
        ));
    }

    #[test]
    fn test_unparseable_violation_stays_database_error() {
        let error = db_error(DatabaseErrorKind::UniqueViolation, "opaque", None);
        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "insert"),
            AppError::Database { operation, .. } if operation == "insert"
        ));
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        let err = DatabaseErrorConverter::convert_diesel_error(
            DieselError::RollbackTransaction,
            "transaction",
        );
        assert!(matches!(err, AppError::Database { .. }));
    }
}
