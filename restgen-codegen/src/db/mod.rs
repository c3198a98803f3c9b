//! Database metadata sources
//!
//! The models stage only needs table names, table comments and column
//! metadata. [`MetadataSource`] is that surface; [`MySqlMetadataSource`] is
//! the production implementation and tests substitute an in-memory fake.

mod mysql;

pub use mysql::MySqlMetadataSource;

use async_trait::async_trait;

use crate::error::Result;

/// Column metadata as reported by `SHOW FULL COLUMNS`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    /// Column name
    pub field: String,
    /// Raw SQL type, e.g. `varchar(255)` or `enum('todo','done')`
    pub column_type: String,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Whether the column is part of the primary key
    pub primary: bool,
    /// Column comment, empty when unset
    pub comment: String,
}

impl ColumnInfo {
    /// Convenience constructor for non-null, non-key columns.
    pub fn new(field: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column_type: column_type.into(),
            nullable: false,
            primary: false,
            comment: String::new(),
        }
    }

    /// Mark the column nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as a primary-key member.
    pub fn primary(mut self) -> Self {
        self.primary = true;
        self
    }

    /// Attach a column comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

/// Read-only access to the table metadata of a live database
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Names of tables starting with `prefix`, in database order.
    async fn table_names(&self, prefix: &str) -> Result<Vec<String>>;

    /// The table's comment from its status row; `None` when the table does
    /// not exist.
    async fn table_comment(&self, table: &str) -> Result<Option<String>>;

    /// Column metadata in definition order.
    async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>>;
}
