//! Loading the `A(eta)` normalisation table into a dense 4D grid.
//!
//! The table file is comma-separated text with one header line followed by rows of
//! `mu_DM, beta_DM, sigma_DM, alpha, A`. The first four columns must enumerate every
//! combination of their unique values exactly once; rows may come in any order.
//!
//! ```rust
//! use aeta_table::ATable;
//!
//! let csv = "mu_DM,beta_DM,sigma_DM,alpha,A\n\
//!            0,2,0,0,1\n0,2,0,1,2\n0,2,1,0,3\n0,2,1,1,4\n\
//!            0,3,0,0,5\n0,3,0,1,6\n0,3,1,0,7\n0,3,1,1,8\n\
//!            1,2,0,0,9\n1,2,0,1,10\n1,2,1,0,11\n1,2,1,1,12\n\
//!            1,3,0,0,13\n1,3,0,1,14\n1,3,1,0,15\n1,3,1,1,16\n";
//!
//! let table = ATable::from_reader(csv.as_bytes()).unwrap();
//! assert_eq!(table.shape(), [2, 2, 2, 2]);
//! assert_eq!(table.eval([1.0, 2.0, 0.0, 1.0]).unwrap(), 10.0);
//! ```
use std::fs::File;
use std::io::Read;
use std::path::Path;

use ndarray::Array4;

use crate::error::TableError;
use crate::multilinear_rectilinear::MultilinearRectilinear;
use crate::utils::unique_sorted;

/// Number of grid axes: `mu_DM`, `beta_DM`, `sigma_DM`, `alpha`.
pub const NDIMS: usize = 4;

/// Columns read from each row; any further columns are ignored.
const NCOLS: usize = NDIMS + 1;

/// The `A(mu_DM, beta_DM, sigma_DM, alpha)` table on its rectilinear grid.
///
/// Immutable once built. Evaluation builds a borrowed [`MultilinearRectilinear`]
/// over the owned axes and values, which costs O(NDIMS).
#[derive(Clone, Debug)]
pub struct ATable {
    /// Sorted unique coordinates along each axis
    axes: [Vec<f64>; NDIMS],

    /// `A` at every grid point, indexed `[mu, beta, sigma, alpha]`
    values: Array4<f64>,
}

impl ATable {
    /// Load a table from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        log::debug!("Reading A(eta) table from {}", path.display());

        let file = File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file)?;

        log::info!(
            "Loaded A(eta) table from {}: {} points on a {:?} grid",
            path.display(),
            table.len(),
            table.shape()
        );
        Ok(table)
    }

    /// Load a table from CSV text.
    ///
    /// The first line is a header. Blank lines and lines starting with `#` are skipped,
    /// and fields are trimmed of surrounding whitespace.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let headers = reader.headers()?;
        log::debug!("Table columns: {:?}", headers.iter().collect::<Vec<_>>());

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(parse_row(&record)?);
        }

        Self::from_rows(&rows)
    }

    /// Build a table from `(mu, beta, sigma, alpha, A)` rows in any order.
    ///
    /// # Errors
    /// * [`TableError::Empty`] if there are no rows
    /// * [`TableError::NonFinite`] if any coordinate is NaN or infinite
    /// * [`TableError::Shape`] if the row count is not the product of the unique-axis counts
    /// * [`TableError::DuplicatePoint`] if a coordinate combination repeats
    pub fn from_rows(rows: &[[f64; NCOLS]]) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::Empty);
        }

        for (row, r) in rows.iter().enumerate() {
            if let Some(column) = (0..NDIMS).find(|&j| !r[j].is_finite()) {
                return Err(TableError::NonFinite {
                    row,
                    column,
                    value: r[column],
                });
            }
        }

        let axes: [Vec<f64>; NDIMS] =
            std::array::from_fn(|j| unique_sorted(rows.iter().map(|r| r[j])));
        let shape: [usize; NDIMS] = std::array::from_fn(|j| axes[j].len());
        // Scattered rows can span a grid too large to count; saturate so it still mismatches
        let expected = shape
            .iter()
            .try_fold(1_usize, |acc, &n| acc.checked_mul(n))
            .unwrap_or(usize::MAX);
        if rows.len() != expected {
            return Err(TableError::Shape {
                rows: rows.len(),
                expected,
                shape,
            });
        }

        // Place each value by its own coordinates, so row order does not matter.
        // With the count check above, rejecting repeats also guarantees every
        // grid point is filled.
        let mut flat = vec![f64::NAN; expected];
        let mut filled = vec![false; expected];
        for (row, r) in rows.iter().enumerate() {
            let mut k = 0;
            for j in 0..NDIMS {
                let i = axes[j].partition_point(|x| *x < r[j]);
                k = k * shape[j] + i;
            }

            if filled[k] {
                return Err(TableError::DuplicatePoint {
                    row,
                    point: [r[0], r[1], r[2], r[3]],
                });
            }
            filled[k] = true;
            flat[k] = r[NDIMS];
        }

        let values = Array4::from_shape_vec(shape, flat)?;
        let table = Self { axes, values };

        // Surface anything the interpolator would reject now, rather than on first use
        table.interpolator()?;

        Ok(table)
    }

    /// Sorted unique `mu_DM` values.
    pub fn mu(&self) -> &[f64] {
        &self.axes[0]
    }

    /// Sorted unique `beta_DM` values.
    pub fn beta(&self) -> &[f64] {
        &self.axes[1]
    }

    /// Sorted unique `sigma_DM` values.
    pub fn sigma(&self) -> &[f64] {
        &self.axes[2]
    }

    /// Sorted unique `alpha` values.
    pub fn alpha(&self) -> &[f64] {
        &self.axes[3]
    }

    pub fn values(&self) -> &Array4<f64> {
        &self.values
    }

    /// Number of points along each axis.
    pub fn shape(&self) -> [usize; NDIMS] {
        std::array::from_fn(|j| self.axes[j].len())
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; a loaded table has at least one point.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Borrow the table as a multilinear interpolator.
    pub fn interpolator(&self) -> Result<MultilinearRectilinear<'_, f64, NDIMS>, TableError> {
        let vals = self
            .values
            .as_slice()
            .ok_or(TableError::Grid("grid values are not contiguous"))?;
        let grids = self.axes.each_ref().map(Vec::as_slice);
        MultilinearRectilinear::new(grids, vals).map_err(TableError::Grid)
    }

    /// Interpolate `A` at `[mu, beta, sigma, alpha]`, extrapolating linearly
    /// outside the grid.
    pub fn eval(&self, point: [f64; NDIMS]) -> Result<f64, TableError> {
        self.interpolator()?
            .interp_one(point)
            .map_err(TableError::Grid)
    }

    /// Interpolate `A` at each of a list of points.
    pub fn eval_many(&self, points: &[[f64; NDIMS]]) -> Result<Vec<f64>, TableError> {
        let interpolator = self.interpolator()?;
        points
            .iter()
            .map(|&p| interpolator.interp_one(p).map_err(TableError::Grid))
            .collect()
    }

    /// Per-axis flags for whether `point` lies outside the grid by more than `atol`,
    /// i.e. whether evaluating there extrapolates.
    pub fn check_bounds(
        &self,
        point: [f64; NDIMS],
        atol: f64,
    ) -> Result<[bool; NDIMS], TableError> {
        Ok(self.interpolator()?.check_bounds(point, atol))
    }
}

/// Parse the leading columns of one data row.
fn parse_row(record: &csv::StringRecord) -> Result<[f64; NCOLS], TableError> {
    let line = record.position().map_or(0, |p| p.line());
    if record.len() < NCOLS {
        return Err(TableError::ColumnCount {
            line,
            expected: NCOLS,
            found: record.len(),
        });
    }

    let mut row = [0.0; NCOLS];
    for (column, field) in record.iter().take(NCOLS).enumerate() {
        row[column] = field.parse().map_err(|source| TableError::Parse {
            line,
            column,
            value: field.to_string(),
            source,
        })?;
    }
    Ok(row)
}
