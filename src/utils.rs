//! Helpers for assembling rectilinear grids, either from scattered
//! table columns or from scratch.
use itertools::Itertools;
use num_traits::Float;

/// Sorted, deduplicated copy of a column of coordinates.
///
/// Values compare by exact equality, so `0.1` and `0.1 + 1e-17` are distinct
/// entries unless they round to the same float. Sorting uses a total order, so NaN
/// sorts last instead of poisoning the sort, but NaNs are never merged.
pub fn unique_sorted<I>(values: I) -> Vec<f64>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .sorted_by(f64::total_cmp)
        .dedup()
        .collect()
}

/// Generates evenly spaced values from start to stop,
/// including the endpoint.
pub fn linspace<T>(start: T, stop: T, n: usize) -> Vec<T>
where
    T: Float,
{
    if n < 2 {
        return vec![start; n];
    }
    let dx: T = (stop - start) / T::from(n - 1).unwrap_or_else(T::one);
    (0..n)
        .map(|i| start + T::from(i).unwrap_or_else(T::zero) * dx)
        .collect()
}

/// Generates a meshgrid in C ordering (x0, y0, z0, x0, y0, z1, ..., x0, yn, zn)
pub fn meshgrid<T>(x: Vec<&Vec<T>>) -> Vec<Vec<T>>
where
    T: Float,
{
    x.into_iter()
        .multi_cartesian_product()
        .map(|xx| xx.iter().map(|y| **y).collect())
        .collect()
}
