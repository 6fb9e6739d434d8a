use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or evaluating an `A(eta)` table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be opened.
    #[error("failed to open table {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer failed to read a record.
    #[error("malformed CSV input")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected at least {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: `{value}` is not a number")]
    Parse {
        line: u64,
        column: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("row {row}, column {column}: grid coordinate {value} is not finite")]
    NonFinite { row: usize, column: usize, value: f64 },

    #[error("table has no data rows")]
    Empty,

    /// The row count does not fill the grid spanned by the unique axis values.
    #[error("table has {rows} rows but its axes span a {shape:?} grid of {expected} points")]
    Shape {
        rows: usize,
        expected: usize,
        shape: [usize; 4],
    },

    #[error("grid point {point:?} appears more than once (row {row})")]
    DuplicatePoint { row: usize, point: [f64; 4] },

    #[error("could not shape grid values")]
    Reshape(#[from] ndarray::ShapeError),

    /// Rejected by the interpolator.
    #[error("invalid grid: {0}")]
    Grid(&'static str),

    #[error("the A(eta) table is already initialised")]
    AlreadyInitialized,
}
