//! Fully normalized Legendre polynomials and their first derivatives
//!
//! Computes the zonal (order 0) Legendre polynomials in the geodesy (4π)
//! normalization for an array of `x = cos(θ)` values, using the three-term
//! recurrence in degree:
//!
//! ```text
//! P_l(x) = ((2l - 1) / l) x P_{l-1}(x) - ((l - 1) / l) P_{l-2}(x)
//! Pbar_l(x) = sqrt(2l + 1) P_l(x)
//! ```
//!
//! The derivative is taken with respect to colatitude θ:
//!
//! ```text
//! dPbar_l/dθ = (l x Pbar_l - f_l Pbar_{l-1}) / sqrt(1 - x²),   f_l = sqrt(l² (2l + 1) / (2l - 1))
//! ```
//!
//! Reference: Hofmann-Wellenhof and Moritz, "Physical Geodesy" (2005).
//!
//! # Poles
//!
//! At `x = ±1` the derivative divides by zero and the returned `dpl` values
//! are non-finite (NaN or infinite). The polynomial values themselves are
//! still valid there. Filter evaluation points away from the poles when finite
//! derivatives are required.

use crate::errors::Result;
use crate::parallel::ParallelConfig;
use ndarray::{Array2, ArrayView1, ArrayViewMut1, Zip};
use num_traits::Float;

/// Converts a small non-negative integer into the working float type.
///
/// Degrees stay well below 2^24, so the `f32` hop is exact.
fn lit<T: From<f32>>(value: usize) -> T {
    From::from(value as f32)
}

/// Computes fully normalized Legendre polynomials and their first derivatives
///
/// Returns `(pl, dpl)`, both of shape `(lmax + 1, x.len())`, where row `l`
/// holds the degree-`l` polynomial (or its colatitude derivative) evaluated at
/// every point of `x`. Points are processed in parallel on Rayon's global pool;
/// each point's recurrence is independent so the output does not depend on the
/// thread count.
///
/// The recurrence is unscaled, so rounding error grows with degree. It is
/// adequate for the few-thousand degree range of geodetic models.
///
/// # Example
/// ```
/// use ndarray::array;
/// use ru_geoid::legendre::legendre_polynomials;
///
/// let x = array![0.5_f64, -0.25];
/// let (pl, dpl) = legendre_polynomials(4, x.view());
/// assert_eq!(pl.shape(), &[5, 2]);
/// assert!((pl[[1, 0]] - 3.0_f64.sqrt() * 0.5).abs() < 1e-15);
/// assert_eq!(dpl[[0, 1]], 0.0);
/// ```
pub fn legendre_polynomials<T>(lmax: usize, x: ArrayView1<'_, T>) -> (Array2<T>, Array2<T>)
where
    T: Float + From<f32> + Send + Sync,
{
    let nx = x.len();
    let mut pl = Array2::<T>::zeros((lmax + 1, nx));
    let mut dpl = Array2::<T>::zeros((lmax + 1, nx));

    Zip::from(pl.columns_mut())
        .and(dpl.columns_mut())
        .and(x)
        .par_for_each(|p, dp, &xi| evaluate_point(lmax, xi, p, dp));

    (pl, dpl)
}

/// [`legendre_polynomials`] run under an explicit thread configuration
///
/// # Errors
///
/// Returns [`crate::errors::GeoidError::ThreadPoolError`] if the scoped pool
/// cannot be built.
pub fn legendre_polynomials_in<T>(
    config: &ParallelConfig,
    lmax: usize,
    x: ArrayView1<'_, T>,
) -> Result<(Array2<T>, Array2<T>)>
where
    T: Float + From<f32> + Send + Sync,
{
    config.install(|| legendre_polynomials(lmax, x))
}

/// Fills one column of `pl` and `dpl` for a single evaluation point
fn evaluate_point<T>(lmax: usize, x: T, mut pl: ArrayViewMut1<'_, T>, mut dpl: ArrayViewMut1<'_, T>)
where
    T: Float + From<f32>,
{
    // unnormalized values for the recurrence
    let mut ptemp = vec![T::zero(); lmax + 1];
    ptemp[0] = T::one();
    pl[0] = ptemp[0];
    if lmax == 0 {
        return;
    }

    ptemp[1] = x;
    pl[1] = lit::<T>(3).sqrt() * ptemp[1];
    for l in 2..=lmax {
        let lf = lit::<T>(l);
        ptemp[l] = (lit::<T>(2 * l - 1) / lf) * x * ptemp[l - 1]
            - (lit::<T>(l - 1) / lf) * ptemp[l - 2];
        pl[l] = lit::<T>(2 * l + 1).sqrt() * ptemp[l];
    }

    let inv_sin = T::one() / (T::one() - x * x).sqrt();
    for l in 1..=lmax {
        let lf = lit::<T>(l);
        let fl = (lf * lf * lit::<T>(2 * l + 1) / lit::<T>(2 * l - 1)).sqrt();
        dpl[l] = inv_sin * (lf * x * pl[l] - fl * pl[l - 1]);
    }
}
