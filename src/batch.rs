//! Result batches: named column vectors sharing one row count.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use crate::error::{ColvecError, Result};
use crate::types::Value;
use crate::vector::ColumnVector;

/// An owned set of columns decoded from one result batch.
///
/// Columns are only reachable by reference, so borrowed vectors cannot
/// outlive the batch they were decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultBatch {
    names: Vec<String>,
    columns: Vec<ColumnVector>,
    num_rows: usize,
}

impl ResultBatch {
    /// Creates a batch from named columns.
    ///
    /// # Errors
    ///
    /// Returns `LayoutMismatch` if the columns have different lengths.
    pub fn try_new(columns: Vec<(String, ColumnVector)>) -> Result<Self> {
        let num_rows = columns.first().map_or(0, |(_, c)| c.len());
        if let Some((name, column)) = columns.iter().find(|(_, c)| c.len() != num_rows) {
            log::debug!("column '{name}' has {} rows, expected {num_rows}", column.len());
            return Err(ColvecError::LayoutMismatch {
                what: "batch column length",
                expected: num_rows,
                actual: column.len(),
            });
        }

        let (names, columns): (Vec<_>, Vec<_>) = columns.into_iter().unzip();
        log::debug!("built batch: {} columns, {num_rows} rows", columns.len());
        Ok(ResultBatch {
            names,
            columns,
            num_rows,
        })
    }

    /// Returns the number of rows in this batch.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of columns in this batch.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Returns the ordered column names.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns a column by index.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&ColumnVector> {
        self.columns.get(index)
    }

    /// Returns a column by name.
    #[must_use]
    pub fn column_by_name(&self, name: &str) -> Option<&ColumnVector> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    /// Decodes one row across all columns.
    ///
    /// # Errors
    ///
    /// Returns `BoundsViolation` if `index >= num_rows`, or any decoding error
    /// of the underlying columns.
    pub fn row(&self, index: usize) -> Result<Row> {
        if index >= self.num_rows {
            return Err(ColvecError::BoundsViolation {
                row: index,
                len: self.num_rows,
            });
        }
        let values = self
            .columns
            .iter()
            .map(|c| c.get(index))
            .collect::<Result<Vec<_>>>()?;
        Ok(Row {
            names: self.names.clone(),
            values,
        })
    }

    /// Decodes every row, in order.
    ///
    /// # Errors
    ///
    /// Returns the first decoding error encountered.
    pub fn rows(&self) -> Result<Vec<Row>> {
        (0..self.num_rows).map(|i| self.row(i)).collect()
    }

    /// Decodes every column in parallel. Output is column-major, in column
    /// order.
    ///
    /// # Errors
    ///
    /// Returns a decoding error from any column.
    pub fn materialize(&self) -> Result<Vec<Vec<Value>>> {
        self.columns.par_iter().map(ColumnVector::to_array).collect()
    }

    /// Converts the batch to an Arrow `RecordBatch`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` for columns with no Arrow export, or
    /// `ExportError` if Arrow rejects the assembled batch.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let arrays = self
            .columns
            .par_iter()
            .map(ColumnVector::to_arrow)
            .collect::<Result<Vec<ArrayRef>>>()?;
        let fields: Vec<Field> = self
            .names
            .iter()
            .zip(&arrays)
            .map(|(name, array)| Field::new(name.clone(), array.data_type().clone(), true))
            .collect();
        RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
            .map_err(|e| ColvecError::ExportError(e.to_string()))
    }
}

/// One decoded row: column names paired with values, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    names: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    /// Gets a value by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| n == column)
            .map(|i| &self.values[i])
    }

    /// Gets a value by column position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Returns the number of columns in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names.iter().map(String::as_str).zip(&self.values)
    }

    /// Consumes the row, returning its values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}
