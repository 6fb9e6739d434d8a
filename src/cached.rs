//! Process-wide `A(eta)` table and the cached lookup with a default `beta_DM`.
//!
//! The table is loaded once, either lazily from [`default_table_path`] on first use
//! or explicitly from another path with [`init_a_interp`], and is read-only afterward.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::TableError;
use crate::table::ATable;

/// File name of the precomputed table.
pub const TABLE_FILE_NAME: &str = "A_eta_table_alpha.csv";

/// `beta_DM` used by [`cached_a_interp`].
pub const DEFAULT_BETA_DM: f64 = 2.04;

static A_INTERP: OnceLock<ATable> = OnceLock::new();

/// Location of the table next to this crate's sources.
pub fn default_table_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("src")
        .join(TABLE_FILE_NAME)
}

/// Load a table from `path` without touching the process-wide one.
pub fn load_a_interpolator<P: AsRef<Path>>(path: P) -> Result<ATable, TableError> {
    ATable::from_path(path)
}

/// Load the table from `path` and install it as the process-wide table.
///
/// # Errors
/// * [`TableError::AlreadyInitialized`] if a table is already installed,
///   whether by an earlier call or by a lookup that loaded the default
/// * Any error from loading the file
pub fn init_a_interp<P: AsRef<Path>>(path: P) -> Result<&'static ATable, TableError> {
    let path = path.as_ref();
    if A_INTERP.get().is_some() {
        log::warn!(
            "Ignoring A(eta) table at {}; a table is already installed",
            path.display()
        );
        return Err(TableError::AlreadyInitialized);
    }

    let table = ATable::from_path(path)?;
    A_INTERP
        .set(table)
        .map_err(|_| TableError::AlreadyInitialized)?;
    log::info!("Installed A(eta) table from {}", path.display());

    A_INTERP.get().ok_or(TableError::AlreadyInitialized)
}

/// The process-wide table, loaded from [`default_table_path`] on first use.
///
/// A failed load is returned to the caller and not remembered, so a later call retries.
pub fn a_interp() -> Result<&'static ATable, TableError> {
    if let Some(table) = A_INTERP.get() {
        return Ok(table);
    }

    let path = default_table_path();
    log::debug!("No A(eta) table installed; loading default");
    let table = ATable::from_path(&path)?;

    // Another thread may have won the race; either table is equivalent
    Ok(A_INTERP.get_or_init(|| table))
}

/// Interpolate the cached table at `(mu0, DEFAULT_BETA_DM, sigma_dm, alpha)`.
pub fn cached_a_interp(mu0: f64, sigma_dm: f64, alpha: f64) -> Result<f64, TableError> {
    cached_a_interp_with_beta(mu0, sigma_dm, alpha, DEFAULT_BETA_DM)
}

/// Interpolate the cached table at `(mu0, beta_dm, sigma_dm, alpha)`.
pub fn cached_a_interp_with_beta(
    mu0: f64,
    sigma_dm: f64,
    alpha: f64,
    beta_dm: f64,
) -> Result<f64, TableError> {
    a_interp()?.eval([mu0, beta_dm, sigma_dm, alpha])
}

#[cfg(test)]
mod test {
    use super::*;

    const UNIT_GRID: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/unit_grid.csv");

    #[test]
    fn test_default_table_path() {
        let path = default_table_path();
        assert!(path.ends_with("src/A_eta_table_alpha.csv"));
    }

    #[test]
    fn test_load_a_interpolator() {
        let table = load_a_interpolator(UNIT_GRID).unwrap();
        assert_eq!(table.shape(), [2, 2, 2, 2]);
    }

    /// The only test in this binary that touches the process-wide table
    #[test]
    fn test_init_and_cached_lookup() {
        let _ = env_logger::builder().is_test(true).try_init();

        let installed = init_a_interp(UNIT_GRID).unwrap();
        assert!(std::ptr::eq(installed, a_interp().unwrap()));

        // A = 1 + mu + 10 beta + 100 sigma + 1000 alpha + 5 mu sigma
        let v = cached_a_interp(0.0, 0.0, 0.0).unwrap();
        assert!((v - 21.4).abs() < 1e-12);

        let v = cached_a_interp(1.0, 1.0, 1.0).unwrap();
        assert!((v - (1.0 + 1.0 + 20.4 + 100.0 + 1000.0 + 5.0)).abs() < 1e-9);

        let v = cached_a_interp_with_beta(1.0, 0.0, 0.0, 3.0).unwrap();
        assert_eq!(v, 32.0);

        assert!(matches!(
            init_a_interp(UNIT_GRID),
            Err(TableError::AlreadyInitialized)
        ));
    }
}
