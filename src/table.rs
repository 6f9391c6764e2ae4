//! Append-only columnar sample storage
//!
//! The [`Table`] is the shared buffer between the producer and the render
//! thread: an ordered set of equally long columns, grown one full row at a
//! time. Rows are never updated or removed, so a reader holding the lock
//! sees a consistent prefix of the stream at all times.
//!
//! Every successful mutation bumps the table's generation counter, which
//! lets observers tell "new frame, same data" from "new data" cheaply.

use crate::error::{PlotError, Result};

/// A single column of samples with an optional name
#[derive(Debug, Clone, Default)]
pub struct Column {
    name: Option<String>,
    values: Vec<f64>,
}

impl Column {
    fn new(name: Option<&str>) -> Self {
        Self {
            name: name.map(|s| s.to_string()),
            values: Vec::new(),
        }
    }

    /// The column name, if one was assigned
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of samples in this column
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column holds no samples yet
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All samples, oldest first
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The sample at `row`, if present
    pub fn get(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied()
    }

    /// The most recent sample, if any
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Append-only table of equally long columns
///
/// Invariant: after every call, all columns have the same length. A
/// rejected insert leaves every column untouched.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    generation: u64,
}

impl Table {
    /// Create an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new empty column, returning the new column count
    ///
    /// Named columns must be unique; unnamed columns may repeat. Columns
    /// are expected to be added before streaming begins, while the table
    /// holds no rows of data that the new column would miss.
    pub fn add_column(&mut self, name: Option<&str>) -> Result<usize> {
        if let Some(name) = name {
            if self.columns.iter().any(|c| c.name() == Some(name)) {
                return Err(PlotError::DuplicateColumn(name.to_string()));
            }
        }

        // A column added mid-stream starts shorter than its siblings;
        // backfill keeps the equal-length invariant.
        let rows = self.row_count();
        let mut column = Column::new(name);
        column.values.resize(rows, f64::NAN);

        self.columns.push(column);
        self.generation += 1;
        Ok(self.columns.len())
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of complete rows
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// All columns in insertion order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column at `index`, if present
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// The first column with the given name
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == Some(name))
    }

    /// The index of the column with the given name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == Some(name))
    }

    /// Append one row, one value per column in column order
    ///
    /// The row width must match the column count exactly; a mismatched
    /// row is rejected before anything is appended.
    pub fn insert_row(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(PlotError::RowWidthMismatch {
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        for (column, &value) in self.columns.iter_mut().zip(values) {
            column.values.push(value);
        }
        self.generation += 1;
        Ok(())
    }

    /// Monotonic counter bumped by every successful mutation
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
