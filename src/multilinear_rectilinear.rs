//! Multilinear interpolation/extrapolation on a rectilinear grid.
//!
//! ```rust
//! use aeta_table::multilinear_rectilinear::MultilinearRectilinear;
//!
//! // Define a grid
//! let x = [1.0_f64, 1.2, 2.0];
//! let y = [1.0_f64, 1.3, 1.5];
//!
//! // Values at grid points, z = x + y
//! let z = [2.0, 2.3, 2.5, 2.2, 2.5, 2.7, 3.0, 3.3, 3.5];
//!
//! let interpolator = MultilinearRectilinear::new([&x[..], &y[..]], &z).unwrap();
//!
//! // Points outside the grid are extrapolated from the nearest cell
//! let v = interpolator.interp_one([0.0, 3.0]).unwrap();
//! assert!((v - 3.0).abs() < 1e-12);
//! ```
//!
//! References
//! * https://en.wikipedia.org/wiki/Bilinear_interpolation#Weighted_mean
use num_traits::Float;

/// An arbitrary-dimensional multilinear interpolator / extrapolator on a rectilinear grid.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
/// Assumes grids are strictly increasing. Only the first two entries of each grid
/// are checked here; a full check is left to whoever assembles the grid.
///
/// Outside the grid, the lower corner of the cell is clipped to the nearest boundary cell
/// and the fractional position in that cell is left unclamped, so the cell's multilinear
/// form is extended linearly along each axis.
///
/// Operation Complexity
/// * O(2^N) for interpolation and extrapolation in all regions.
///
/// Memory Complexity
/// * Peak stack usage is O(N). No allocation.
///
/// Timing
/// * Timing determinism is very tight, but not guaranteed due to the use of a bisection search.
#[derive(Clone, Copy, Debug)]
pub struct MultilinearRectilinear<'a, T: Float, const N: usize> {
    /// x, y, ... coordinate grids, each entry of size dims[i]
    grids: [&'a [T]; N],

    /// Size of each dimension
    dims: [usize; N],

    /// Cumulative products of higher dimensions, used for indexing
    dimprod: [usize; N],

    /// Values at each point, size prod(dims)
    vals: &'a [T],
}

impl<'a, T: Float, const N: usize> MultilinearRectilinear<'a, T, N> {
    /// Build a new interpolator, using O(N) calculations and storage.
    ///
    /// Dimensions of size one are allowed; the interpolant is constant along them.
    ///
    /// # Errors
    /// * If N is zero
    /// * If any grid is empty
    /// * If the number of values does not match the product of the grid sizes
    /// * If any step sizes have zero or negative magnitude
    pub fn new(grids: [&'a [T]; N], vals: &'a [T]) -> Result<Self, &'static str> {
        if N == 0 {
            return Err("At least one dimension is required");
        }

        let mut dims = [1_usize; N];
        (0..N).for_each(|i| dims[i] = grids[i].len());
        if dims.iter().any(|&n| n == 0) {
            return Err("All grids must have at least 1 entry");
        }
        let nvals = dims.iter().try_fold(1_usize, |acc, &n| acc.checked_mul(n));
        if nvals != Some(vals.len()) {
            return Err("Dimension mismatch");
        }

        // Check that at least the first two entries in each grid are monotonic
        let monotonic_maybe = grids.iter().all(|&g| g.len() < 2 || g[1] > g[0]);
        if !monotonic_maybe {
            return Err("All grids must be monotonically increasing");
        }

        // Populate cumulative product of higher dimensions for indexing.
        //
        // Each entry is the cumulative product of the size of dimensions
        // higher than this one, which is the stride between blocks
        // relating to a given index along each dimension.
        let mut dimprod = [1_usize; N];
        let mut acc = 1;
        (0..N).for_each(|i| {
            dimprod[N - i - 1] = acc;
            acc *= dims[N - i - 1];
        });

        Ok(Self {
            grids,
            dims,
            dimprod,
            vals,
        })
    }

    /// Size of each dimension.
    pub fn dims(&self) -> [usize; N] {
        self.dims
    }

    /// Interpolate on a list of observation points given as one coordinate slice per dimension.
    ///
    /// # Errors
    ///   * If the coordinate slices and the output do not all have the same length
    pub fn interp(&self, x: &[&[T]; N], out: &mut [T]) -> Result<(), &'static str> {
        let size_matches = x.iter().all(|&xx| xx.len() == out.len());
        if !size_matches {
            return Err("Dimension mismatch");
        }

        let mut tmp = [T::zero(); N];
        for i in 0..out.len() {
            (0..N).for_each(|j| tmp[j] = x[j][i]);
            out[i] = self.interp_one(tmp)?;
        }

        Ok(())
    }

    /// Interpolate the value at a point,
    /// using fixed-size intermediate storage of O(N) and no allocation.
    ///
    /// Points exactly on a grid vertex return the stored value exactly.
    /// NaN coordinates produce a NaN result.
    ///
    /// # Errors
    ///   * If the value index for any vertex falls outside the value array,
    ///     which can only happen if the interpolator was built inconsistently
    #[inline]
    pub fn interp_one(&self, x: [T; N]) -> Result<T, &'static str> {
        let mut origin = [0_usize; N]; // Indices of lower corner of hypercube
        let mut ts = [T::zero(); N]; // Fractional position within the cell on each dimension

        for i in 0..N {
            (origin[i], ts[i]) = self.get_loc(x[i], i);
        }

        // Traverse vertices, summing weighted contributions.
        //
        // Bit `j` of the vertex index selects the lower or upper face on dimension `j`,
        // which visits each of the 2^N vertices of the cell exactly once.
        let nverts = 1_usize << N;
        let mut interped = T::zero();
        for i in 0..nverts {
            let mut k = 0; // index of the value for this vertex in self.vals
            let mut weight = T::one();
            for j in 0..N {
                let upper = (i >> j) & 1 == 1;
                // Saturate to the bound on degenerate dimensions
                let loc = (origin[j] + upper as usize).min(self.dims[j] - 1);
                k += self.dimprod[j] * loc;
                weight = weight * if upper { ts[j] } else { T::one() - ts[j] };
            }

            let v = *self.vals.get(k).ok_or("Index out of bounds")?;

            // Skip zero-weight vertices so that a non-finite neighbor
            // does not poison an exact hit on a grid vertex
            if weight != T::zero() {
                interped = interped + weight * v;
            }
        }

        Ok(interped)
    }

    /// Check whether a point is outside the grid by more than some absolute tolerance.
    ///
    /// Output entry `i` is `false` if the point is inside on that dimension,
    /// and `true` if there is a bounds violation on that axis.
    pub fn check_bounds(&self, x: [T; N], atol: T) -> [bool; N] {
        let mut out = [false; N];
        for i in 0..N {
            let lo = self.grids[i][0];
            let hi = self.grids[i][self.dims[i] - 1];
            out[i] = (x[i] - lo) <= -atol || (x[i] - hi) >= atol;
        }
        out
    }

    /// Get the lower-corner index along this dimension where `v` is found,
    /// and the fractional position of `v` in that cell.
    ///
    /// Outside the grid, the lower corner saturates to the boundary cell and the
    /// fraction falls below 0 or above 1, which extrapolates the cell linearly.
    /// At the high bound of a given dimension, saturates to the interior.
    #[inline]
    fn get_loc(&self, v: T, dim: usize) -> (usize, T) {
        let grid = self.grids[dim];

        // Bisection search to find location on the grid.
        //
        // The search will return `0` if the point is outside-low,
        // and will return `self.dims[dim]` if outside-high.
        let iloc: isize = grid.partition_point(|x| *x < v) as isize - 1;

        let dimmax = self.dims[dim].saturating_sub(2); // maximum index for lower corner
        let loc = (iloc.max(0) as usize).min(dimmax); // unsigned integer loc clipped to interior

        // Degenerate dimension; all weight goes to the single grid point
        if self.dims[dim] < 2 {
            return (loc, T::zero());
        }

        let x0 = grid[loc];
        let x1 = grid[loc + 1];
        let t = (v - x0) / (x1 - x0);

        (loc, t)
    }
}
