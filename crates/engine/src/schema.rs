//! Descriptive schemas
//!
//! A schema names tables and their columns. Schemas are validated and
//! stored; they are not enforced on bucket contents.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use magnetic_core::{MagneticError, Result};

/// A named column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    pub name: String,
}

impl Column {
    /// Column called `name`
    pub fn new(name: impl Into<String>) -> Self {
        Column { name: name.into() }
    }
}

/// A named table with its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Columns in declaration order
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    /// Table called `name` with the given column names
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            name: name.into(),
            columns: columns.into_iter().map(Column::new).collect(),
        }
    }
}

/// A set of tables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Tables in declaration order
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Schema {
    /// Schema with the given tables
    pub fn new(tables: Vec<Table>) -> Self {
        Schema { tables }
    }

    /// Check structural validity
    ///
    /// Table names must be non-empty and unique within the schema; column
    /// names must be non-empty and unique within their table.
    pub fn validate(&self) -> Result<()> {
        let mut tables = BTreeSet::new();
        for table in &self.tables {
            if table.name.trim().is_empty() {
                return Err(MagneticError::InvalidSchema("table name is empty".into()));
            }
            if !tables.insert(table.name.as_str()) {
                return Err(MagneticError::InvalidSchema(format!(
                    "duplicate table '{}'",
                    table.name
                )));
            }

            let mut columns = BTreeSet::new();
            for column in &table.columns {
                if column.name.trim().is_empty() {
                    return Err(MagneticError::InvalidSchema(format!(
                        "empty column name in table '{}'",
                        table.name
                    )));
                }
                if !columns.insert(column.name.as_str()) {
                    return Err(MagneticError::InvalidSchema(format!(
                        "duplicate column '{}' in table '{}'",
                        column.name, table.name
                    )));
                }
            }
        }
        Ok(())
    }
}
