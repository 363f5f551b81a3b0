//! Schema introspection types
//!
//! Structured descriptors produced by the metadata facades. The mapping from
//! the tabular introspection output lives here so it can be tested without a
//! database; SQLite has no table comments or column extras, so those fields
//! stay `None` on this backend.

use crate::value::{Row, SqlValue};
use serde::{Deserialize, Serialize};
use tenax_core::{Error, Result};

/// One table known to the database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table name
    pub name: String,
    /// Table comment, where the backend has one
    pub comment: Option<String>,
}

/// Role a column plays in the table's key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    /// Not part of any key
    #[default]
    None,
    /// Part of the primary key
    Primary,
}

/// One column of a table, as reported by introspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Column name
    pub name: String,
    /// Declared type, as written in the schema (may be empty)
    pub data_type: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Key role of the column
    pub key: KeyRole,
    /// Declared default value, rendered as text
    pub default: Option<String>,
    /// Backend-specific extra attributes (auto-increment and the like)
    pub extra: Option<String>,
    /// Column comment, where the backend has one
    pub comment: Option<String>,
}

impl FieldDescriptor {
    /// Map one `PRAGMA table_info` result row into a descriptor
    ///
    /// Expects the pragma's column layout: `cid, name, type, notnull,
    /// dflt_value, pk`.
    pub fn from_pragma_row(row: &Row) -> Result<Self> {
        let name = match row.get("name") {
            Some(SqlValue::Text(name)) => name.clone(),
            other => {
                return Err(Error::InvalidArgument(format!(
                    "introspection row has no usable `name` column: {other:?}"
                )))
            }
        };
        let data_type = match row.get("type") {
            Some(SqlValue::Text(t)) => t.clone(),
            _ => String::new(),
        };
        let notnull = row
            .get("notnull")
            .and_then(SqlValue::as_integer)
            .unwrap_or(0);
        let pk = row.get("pk").and_then(SqlValue::as_integer).unwrap_or(0);
        let default = match row.get("dflt_value") {
            Some(SqlValue::Text(v)) => Some(v.clone()),
            Some(SqlValue::Integer(v)) => Some(v.to_string()),
            Some(SqlValue::Real(v)) => Some(v.to_string()),
            _ => None,
        };

        Ok(FieldDescriptor {
            name,
            data_type,
            nullable: notnull == 0,
            key: if pk > 0 { KeyRole::Primary } else { KeyRole::None },
            default,
            extra: None,
            comment: None,
        })
    }
}

/// Quote an identifier for interpolation into statement text
///
/// Facades bind data values as parameters; identifiers (table names) cannot
/// be bound, so they are double-quoted with embedded quotes doubled.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
