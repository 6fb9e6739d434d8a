use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    StandardUniform: rand::distr::Distribution<T>,
{
    std::iter::repeat_with(|| rng.random::<T>())
        .take(n)
        .collect()
}

/// Render table rows as CSV text with the standard header
pub fn table_csv(rows: &[[f64; 5]]) -> String {
    let mut text = String::from("mu_DM,beta_DM,sigma_DM,alpha,A\n");
    for row in rows {
        let line: Vec<String> = row.iter().map(|v| format!("{v:?}")).collect();
        text.push_str(&line.join(","));
        text.push('\n');
    }
    text
}

/// Rows of a dense 4D table with `A = f(mu, beta, sigma, alpha)`,
/// in C order over the given axes
pub fn table_rows(axes: [&Vec<f64>; 4], f: impl Fn([f64; 4]) -> f64) -> Vec<[f64; 5]> {
    crate::utils::meshgrid(axes.to_vec())
        .into_iter()
        .map(|p| {
            let point = [p[0], p[1], p[2], p[3]];
            [p[0], p[1], p[2], p[3], f(point)]
        })
        .collect()
}

/// Shuffle rows in place with the fixed-seed generator
pub fn shuffled(mut rows: Vec<[f64; 5]>) -> Vec<[f64; 5]> {
    rows.shuffle(&mut rng_fixed_seed());
    rows
}
