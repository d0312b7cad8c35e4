use std::sync::OnceLock;

use regex::Regex;

/// Tables whose default PostgreSQL constraint names we know how to split.
/// Longer names first so `group_members_...` is not read as `groups`.
const KNOWN_TABLES: &[&str] = &[
    "work_applications",
    "coin_transactions",
    "group_members",
    "notifications",
    "work_posts",
    "products",
    "ratings",
    "orders",
    "groups",
    "users",
];

const CONSTRAINT_SUFFIXES: &[&str] = &["_fkey", "_pkey", "_key", "_check", "_idx"];

/// Extracts entity/field/value information from PostgreSQL constraint
/// violation messages and default constraint names.
pub struct ConstraintParser;

struct Patterns {
    key_value: Regex,
    column: Regex,
    relation: Regex,
    referenced_table: Regex,
}

static PATTERNS: OnceLock<Patterns> = OnceLock::new();

impl ConstraintParser {
    fn patterns() -> &'static Patterns {
        PATTERNS.get_or_init(|| Patterns {
            // Key (email)=(a@b.c)  /  Key (group_id, user_id)=(3, 7)
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("valid regex"),
            column: Regex::new(r#"column "([^"]+)""#).expect("valid regex"),
            relation: Regex::new(r#"(?:relation|table) "([^"]+)""#).expect("valid regex"),
            referenced_table: Regex::new(r#"not present in table "([^"]+)""#)
                .expect("valid regex"),
        })
    }

    /// `(entity, field, value)` for a unique violation.
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let from_constraint = constraint_name.and_then(Self::parse_constraint_name);
        let key_value = Self::extract_key_value(message);

        match (from_constraint, key_value) {
            (Some((entity, _)), Some((field, value))) => Some((entity, field, value)),
            (Some((entity, field)), None) => Some((entity, field, "duplicate_value".to_string())),
            (None, Some((field, value))) => {
                let entity =
                    Self::extract_relation(message).unwrap_or_else(|| "resource".to_string());
                Some((entity, field, value))
            }
            (None, None) => None,
        }
    }

    /// `(entity, field)` for a not-null violation.
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_column(message)?;
        let entity = Self::extract_relation(message)
            .or_else(|| {
                constraint_name
                    .and_then(Self::parse_constraint_name)
                    .map(|(entity, _)| entity)
            })
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// `(referenced_entity, field, value)` for a foreign key violation.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let referenced = Self::patterns()
            .referenced_table
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string());

        if let Some((field, value)) = Self::extract_key_value(message) {
            return Some((
                referenced.unwrap_or_else(|| "resource".to_string()),
                field,
                value,
            ));
        }

        let (_, field) = constraint_name.and_then(Self::parse_constraint_name)?;
        Some((
            referenced.unwrap_or_else(|| "resource".to_string()),
            field,
            "invalid_reference".to_string(),
        ))
    }

    /// `(entity, field)` for a check violation.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(parsed) = constraint_name.and_then(Self::parse_constraint_name) {
            return Some(parsed);
        }

        let field = Self::extract_column(message)?;
        let entity = Self::extract_relation(message).unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Splits a default PostgreSQL constraint name into `(table, columns)`.
    ///
    /// - `users_email_key` -> (`users`, `email`)
    /// - `group_members_group_id_user_id_key` -> (`group_members`, `group_id_user_id`)
    /// - `orders_creator_id_fkey` -> (`orders`, `creator_id`)
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;

        if let Some(table) = KNOWN_TABLES
            .iter()
            .find(|table| stem.starts_with(*table) && stem[table.len()..].starts_with('_'))
        {
            let columns = &stem[table.len() + 1..];
            if columns.is_empty() {
                return None;
            }
            return Some((table.to_string(), columns.to_string()));
        }

        let (table, columns) = stem.split_once('_')?;
        if table.is_empty() || columns.is_empty() {
            return None;
        }
        Some((table.to_string(), columns.to_string()))
    }

    pub fn extract_key_value(message: &str) -> Option<(String, String)> {
        let caps = Self::patterns().key_value.captures(message)?;
        Some((caps.get(1)?.as_str().to_string(), caps.get(2)?.as_str().to_string()))
    }

    pub fn extract_column(message: &str) -> Option<String> {
        Self::patterns()
            .column
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// First `relation "x"` or `table "x"` in the message.
    pub fn extract_relation(message: &str) -> Option<String> {
        Self::patterns()
            .relation
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}
