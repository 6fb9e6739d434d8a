//! Lookup of the precomputed `A(eta)` normalisation table.
//!
//! The table is a function of four parameters, `mu_DM`, `beta_DM`, `sigma_DM` and `alpha`,
//! sampled on a dense rectilinear grid and stored as CSV. It is loaded once and evaluated
//! by multilinear interpolation, extrapolating linearly outside the sampled range.
//!
//! ```rust,no_run
//! use aeta_table::{cached_a_interp, init_a_interp};
//!
//! init_a_interp("data/A_eta_table_alpha.csv").unwrap();
//! let a = cached_a_interp(0.3, 0.5, 1.0).unwrap(); // beta_DM = 2.04
//! ```
//!
//! Without the default `std` feature only the allocation-free interpolator in
//! [`multilinear_rectilinear`] is built.
#![cfg_attr(not(feature = "std"), no_std)]
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod multilinear_rectilinear;

#[cfg(feature = "std")]
pub mod cached;
#[cfg(feature = "std")]
pub mod error;
#[cfg(feature = "std")]
pub mod table;
#[cfg(feature = "std")]
pub mod utils;

#[cfg(all(test, feature = "std"))]
pub(crate) mod testing;

pub use multilinear_rectilinear::MultilinearRectilinear;

#[cfg(feature = "std")]
pub use cached::{
    a_interp, cached_a_interp, cached_a_interp_with_beta, default_table_path, init_a_interp,
    load_a_interpolator, DEFAULT_BETA_DM, TABLE_FILE_NAME,
};
#[cfg(feature = "std")]
pub use error::TableError;
#[cfg(feature = "std")]
pub use table::ATable;
