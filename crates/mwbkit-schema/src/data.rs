//! Seed rows stored next to the model.
//!
//! Workbench keeps per-table inserts in an embedded SQLite database. Reading
//! it is the job of a [`SeedSource`]; this module only collects the rows.

use crate::LoadError;

/// Workbench's internal stored-procedure table, never user data.
pub const INTERNAL_TABLE: &str = "XP_PROC";

/// One cell of a seed row.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// All rows of one table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    pub name: String,
    /// Column names, in result order.
    pub columns: Vec<String>,
    /// Rows of positional values, aligned with `columns`.
    pub rows: Vec<Vec<SeedValue>>,
}

impl DataTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of one column across all rows.
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &SeedValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(idx)))
    }
}

/// Reads tables out of the embedded row store.
pub trait SeedSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn table_names(&self) -> Result<Vec<String>, Self::Error>;

    fn read_table(&self, name: &str) -> Result<DataTable, Self::Error>;
}

/// Seed rows of every user table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    pub tables: Vec<DataTable>,
}

impl SeedData {
    pub fn load<S: SeedSource>(source: &S) -> Result<Self, LoadError> {
        let names = source
            .table_names()
            .map_err(|e| LoadError::Seed(Box::new(e)))?;
        let mut tables = Vec::with_capacity(names.len());
        for name in names.iter().filter(|name| *name != INTERNAL_TABLE) {
            let table = source
                .read_table(name)
                .map_err(|e| LoadError::Seed(Box::new(e)))?;
            tables.push(table);
        }
        Ok(Self { tables })
    }

    pub fn table(&self, name: &str) -> Option<&DataTable> {
        self.tables.iter().find(|t| t.name == name)
    }
}
