//! Typed SQL operation facades
//!
//! Every method here is sugar over [`Client::execute`]: one retried unit of
//! work per call, no resilience logic of its own. Data values are always
//! bound as parameters; table names are quoted identifiers because they
//! cannot be bound.

use crate::driver::{SqlConfig, SqliteDriver};
use crate::schema::{quote_ident, FieldDescriptor, TableInfo};
use crate::value::{Row, SqlValue};
use rusqlite::params_from_iter;
use tenax_client::Client;
use tenax_core::{Error, Result};
use tracing::debug;

/// Default number of records per batch-write chunk
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Outcome of a conditional insert
///
/// Returned instead of an error so call sites can branch on the outcome:
/// inserted, already present, or `Err` from the surrounding `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The record was inserted
    Inserted,
    /// A conflicting record already existed; nothing was written
    AlreadyPresent,
}

/// Resilient client for the relational backend
pub struct SqlClient {
    inner: Client<SqliteDriver>,
}

impl SqlClient {
    /// Connect to the configured database
    pub fn connect(config: SqlConfig) -> Result<Self> {
        let options = config.options.clone();
        let inner = Client::connect(SqliteDriver::new(config), options)?;
        Ok(SqlClient { inner })
    }

    /// Run a read-only statement and collect every result row
    ///
    /// Columns keep the order the query produced them in.
    pub fn query(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>> {
        self.inner.execute(sql, |conn| {
            let mut stmt = conn.prepare(sql)?;
            let names: Vec<String> = stmt
                .column_names()
                .iter()
                .map(|name| name.to_string())
                .collect();
            let mut rows = stmt.query(params_from_iter(args.iter()))?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut record = Row::new();
                for (index, name) in names.iter().enumerate() {
                    record.push(name.clone(), SqlValue::from(row.get_ref(index)?));
                }
                out.push(record);
            }
            Ok(out)
        })
    }

    /// Run a write statement and return the affected-row count
    ///
    /// Outside a transaction scope the statement commits itself; inside one
    /// it becomes part of the scope.
    pub fn mutate(&self, sql: &str, args: &[SqlValue]) -> Result<usize> {
        self.inner
            .execute(sql, |conn| conn.execute(sql, params_from_iter(args.iter())))
    }

    /// Insert `records` into `table` in chunks of `chunk_size`
    ///
    /// Issues one multi-row insert per chunk, `ceil(records / chunk_size)`
    /// statements in total. A failing chunk aborts the remaining chunks and
    /// surfaces the failure; chunks already written stay written. Every
    /// record must carry the columns of the first one.
    pub fn batch_mutate(&self, table: &str, records: &[Row], chunk_size: usize) -> Result<bool> {
        if records.is_empty() {
            return Ok(true);
        }
        let chunk_size = chunk_size.max(1);
        let columns: Vec<&str> = records[0].column_names().collect();
        if columns.is_empty() {
            return Err(Error::InvalidArgument(
                "batch records must have at least one column".to_string(),
            ));
        }
        let column_list = columns
            .iter()
            .map(|column| quote_ident(column))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholder_row = format!("({})", vec!["?"; columns.len()].join(", "));

        let mut total = 0usize;
        for chunk in records.chunks(chunk_size) {
            let values_clause = vec![placeholder_row.as_str(); chunk.len()].join(", ");
            let sql = format!(
                "INSERT INTO {} ({}) VALUES {}",
                quote_ident(table),
                column_list,
                values_clause
            );

            let mut bound: Vec<&SqlValue> = Vec::with_capacity(chunk.len() * columns.len());
            for record in chunk {
                for column in &columns {
                    bound.push(record.get(column).ok_or_else(|| {
                        Error::InvalidArgument(format!("batch record missing column `{column}`"))
                    })?);
                }
            }

            total += self.inner.execute(&sql, |conn| {
                conn.execute(&sql, params_from_iter(bound.iter().copied()))
            })?;
        }

        debug!(
            target: "tenax::client",
            table,
            records = records.len(),
            affected = total,
            "batch write complete"
        );
        Ok(true)
    }

    /// Run a read and return its first row, if any
    pub fn get_one(&self, sql: &str, args: &[SqlValue]) -> Result<Option<Row>> {
        Ok(self.query(sql, args)?.into_iter().next())
    }

    /// Run a counting read: first column of the first row, or 0 with no rows
    ///
    /// The underlying query determines the column order, so "first column"
    /// is well-defined; an aggregate like `COUNT(*)` should be the leading
    /// select expression.
    pub fn get_count(&self, sql: &str, args: &[SqlValue]) -> Result<i64> {
        match self.get_one(sql, args)? {
            None => Ok(0),
            Some(row) => match row.get_index(0) {
                None | Some(SqlValue::Null) => Ok(0),
                Some(SqlValue::Integer(n)) => Ok(*n),
                Some(other) => Err(Error::InvalidArgument(format!(
                    "count query produced a non-integer first column: {other:?}"
                ))),
            },
        }
    }

    /// Whether a table with this name exists
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let count = self.get_count(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            &[SqlValue::from(name)],
        )?;
        Ok(count > 0)
    }

    /// Names of all user tables
    ///
    /// SQLite has no table comments, so `comment` is always `None` here.
    pub fn table_names(&self) -> Result<Vec<TableInfo>> {
        let rows = self.query(
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
            &[],
        )?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get("name"))
            .filter_map(SqlValue::as_text)
            .map(|name| TableInfo {
                name: name.to_string(),
                comment: None,
            })
            .collect())
    }

    /// Structured column descriptors for one table
    pub fn table_schema(&self, name: &str) -> Result<Vec<FieldDescriptor>> {
        let rows = self.query(&format!("PRAGMA table_info({})", quote_ident(name)), &[])?;
        rows.iter().map(FieldDescriptor::from_pragma_row).collect()
    }

    /// Insert `record` unless a conflicting one already exists
    pub fn insert_if_absent(&self, table: &str, record: &Row) -> Result<InsertOutcome> {
        if record.is_empty() {
            return Err(Error::InvalidArgument(
                "record must have at least one column".to_string(),
            ));
        }
        let columns: Vec<&str> = record.column_names().collect();
        let column_list = columns
            .iter()
            .map(|column| quote_ident(column))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT OR IGNORE INTO {} ({}) VALUES ({})",
            quote_ident(table),
            column_list,
            placeholders
        );
        let args: Vec<&SqlValue> = record.iter().map(|(_, value)| value).collect();

        let affected = self.inner.execute(&sql, |conn| {
            conn.execute(&sql, params_from_iter(args.iter().copied()))
        })?;
        Ok(if affected == 0 {
            InsertOutcome::AlreadyPresent
        } else {
            InsertOutcome::Inserted
        })
    }

    /// Run `body` inside one transaction
    ///
    /// Opens the transaction with a retried `BEGIN` (which also validates
    /// the connection), then commits on `Ok` and rolls back on `Err`,
    /// re-propagating the body's error unchanged. Scopes do not nest.
    pub fn with_transaction<T, F>(&self, body: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        self.inner
            .execute("BEGIN", |conn| conn.execute_batch("BEGIN"))?;
        self.inner.with_transaction(|_| body(self))
    }

    /// Tear down the connection; safe to call any number of times
    pub fn close(&self) {
        self.inner.close();
    }

    /// Whether a handle is currently open
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }
}
