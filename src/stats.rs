//! Descriptive statistics over a finite sample.
//!
//! Every function borrows its input and never mutates it. Order statistics
//! sort a private copy.
//!
//! # Numeric promotion
//!
//! Arithmetic statistics accept any primitive numeric element type and
//! convert through [`AsPrimitive<f64>`], so integer samples yield `f64`
//! results (`mean(&[1, 2, 2, 3, 4])` is `2.4`). The exceptions are
//! [`median_low`] and [`median_high`], which return an element of the
//! sample, and the odd-length case of [`median`].
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation.
//! - **Variance/StdDev**: two-pass, mean first and then the sum of squared
//!   deviations. Sample variance divides by `n − 1`, population variance
//!   by `n`.
//! - **Mode**: frequency count by equality; all values tied for the highest
//!   count are returned.

use std::cmp::Ordering;

use log::trace;
use num_traits::AsPrimitive;

use crate::error::{StatsError, StatsResult};

/// Result of [`median`].
///
/// Odd-length samples have a true middle element, returned unchanged.
/// Even-length samples average the two middle elements, which always
/// promotes to `f64` (the integers `2` and `4` give `3.0`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Median<T> {
    /// The exact middle element of an odd-length sample.
    Middle(T),
    /// The mean of the two middle elements of an even-length sample.
    Midpoint(f64),
}

impl<T: AsPrimitive<f64>> Median<T> {
    /// Returns the median as `f64`, whichever variant it is.
    ///
    /// # Examples
    /// ```
    /// use u_descriptive::Median;
    /// assert_eq!(Median::Middle(2_i64).value(), 2.0);
    /// assert_eq!(Median::<i64>::Midpoint(2.5).value(), 2.5);
    /// ```
    pub fn value(&self) -> f64 {
        match *self {
            Median::Middle(x) => x.as_(),
            Median::Midpoint(m) => m,
        }
    }
}

impl<T: AsPrimitive<f64>> PartialEq<f64> for Median<T> {
    fn eq(&self, other: &f64) -> bool {
        self.value() == *other
    }
}

/// Computes the arithmetic mean, `sum(data) / len(data)`, in `f64`.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
///
/// # Examples
/// ```
/// use u_descriptive::mean;
/// assert_eq!(mean(&[1, 2, 2, 3, 4]).unwrap(), 2.4);
/// ```
pub fn mean<T: AsPrimitive<f64>>(data: &[T]) -> StatsResult<f64> {
    if data.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    Ok(kahan_sum(data.iter().map(|&x| x.as_())) / data.len() as f64)
}

/// Computes the median (middle value) of `data` without mutating it.
///
/// With `n` values and `i = (n − 1) / 2` on the sorted copy, odd `n`
/// returns `sorted[i]` and even `n` returns `(sorted[i] + sorted[i + 1]) / 2`.
///
/// # Complexity
/// Time: O(n log n), Space: O(n)
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
/// - [`StatsError::Unordered`] if `data` contains a value with no order
///   (NaN).
///
/// # Examples
/// ```
/// use u_descriptive::{median, Median};
/// assert_eq!(median(&[1, 2, 4]).unwrap(), Median::Middle(2));
/// assert_eq!(median(&[1, 2, 3, 4]).unwrap(), 2.5);
/// ```
pub fn median<T: PartialOrd + AsPrimitive<f64>>(data: &[T]) -> StatsResult<Median<T>> {
    let sorted = sorted_copy(data)?;
    let n = sorted.len();
    let i = (n - 1) / 2;
    if n % 2 == 1 {
        Ok(Median::Middle(sorted[i]))
    } else {
        Ok(Median::Midpoint((sorted[i].as_() + sorted[i + 1].as_()) / 2.0))
    }
}

/// Returns the low median: the middle element for odd `n`, otherwise the
/// smaller of the two middle elements. Never interpolates.
///
/// Only an ordering is required, so nominal values work too.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
/// - [`StatsError::Unordered`] if `data` contains a value with no order.
///
/// # Examples
/// ```
/// use u_descriptive::median_low;
/// assert_eq!(median_low(&[1, 2, 4]).unwrap(), 2);
/// assert_eq!(median_low(&[1, 2, 3, 4]).unwrap(), 2);
/// ```
pub fn median_low<T: PartialOrd + Clone>(data: &[T]) -> StatsResult<T> {
    let mut sorted = sorted_copy(data)?;
    let n = sorted.len();
    let i = if n % 2 == 1 { n / 2 } else { n / 2 - 1 };
    Ok(sorted.swap_remove(i))
}

/// Returns the high median, `sorted[n / 2]`: the middle element for odd
/// `n`, otherwise the larger of the two middle elements.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
/// - [`StatsError::Unordered`] if `data` contains a value with no order.
///
/// # Examples
/// ```
/// use u_descriptive::median_high;
/// assert_eq!(median_high(&[1, 2, 4]).unwrap(), 2);
/// assert_eq!(median_high(&[1, 2, 3, 4]).unwrap(), 3);
/// ```
pub fn median_high<T: PartialOrd + Clone>(data: &[T]) -> StatsResult<T> {
    let mut sorted = sorted_copy(data)?;
    let i = sorted.len() / 2;
    Ok(sorted.swap_remove(i))
}

/// Returns every distinct value that occurs most often in `data`.
///
/// Ties are not broken: a multi-modal sample returns all of its modes.
/// Each mode appears once. Callers must not rely on the order of the
/// returned values.
///
/// Values are compared with `==`, so numeric and nominal data are both
/// accepted. Since `NaN != NaN`, each NaN counts as its own value.
///
/// # Complexity
/// Time: O(n·k) for `k` distinct values, Space: O(k)
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
///
/// # Examples
/// ```
/// use u_descriptive::mode;
/// assert_eq!(mode(&[1, 2, 2, 2, 3, 3, 4]).unwrap(), vec![2]);
/// assert_eq!(mode(&["int", "string", "float", "float"]).unwrap(), vec!["float"]);
/// ```
pub fn mode<T: PartialEq + Clone>(data: &[T]) -> StatsResult<Vec<T>> {
    let mut counts: Vec<(&T, usize)> = Vec::new();
    for x in data {
        match counts.iter_mut().find(|entry| entry.0 == x) {
            Some(entry) => entry.1 += 1,
            None => counts.push((x, 1)),
        }
    }
    let most = counts
        .iter()
        .map(|&(_, count)| count)
        .max()
        .ok_or(StatsError::EmptyInput)?;
    trace!("mode: {} distinct values, highest count {most}", counts.len());
    Ok(counts
        .into_iter()
        .filter(|&(_, count)| count == most)
        .map(|(value, _)| value.clone())
        .collect())
}

/// Computes the sample variance, `Σ(x − mean)² / (n − 1)`.
///
/// Uses Bessel's correction for an unbiased estimate of the variance of
/// the population the sample was drawn from.
///
/// # Errors
/// - [`StatsError::InsufficientData`] if `data.len() < 2`.
///
/// # Examples
/// ```
/// use u_descriptive::variance;
/// let var = variance(&[1, 2, 3, 4]).unwrap();
/// assert!((var - 1.6666666666666667).abs() < 1e-15);
/// ```
pub fn variance<T: AsPrimitive<f64>>(data: &[T]) -> StatsResult<f64> {
    if data.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            actual: data.len(),
        });
    }
    Ok(sum_squared_deviations(data)? / (data.len() - 1) as f64)
}

/// Computes the population variance, `Σ(x − mean)² / n`.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
///
/// # Examples
/// ```
/// use u_descriptive::pvariance;
/// assert_eq!(pvariance(&[1, 2, 3, 4]).unwrap(), 1.25);
/// ```
pub fn pvariance<T: AsPrimitive<f64>>(data: &[T]) -> StatsResult<f64> {
    Ok(sum_squared_deviations(data)? / data.len() as f64)
}

/// Computes the sample standard deviation, `sqrt(variance(data))`.
///
/// # Errors
/// - [`StatsError::InsufficientData`] if `data.len() < 2`.
///
/// # Examples
/// ```
/// use u_descriptive::stdev;
/// let sd = stdev(&[1, 2, 3, 4]).unwrap();
/// assert!((sd - 1.2909944487358056).abs() < 1e-15);
/// ```
pub fn stdev<T: AsPrimitive<f64>>(data: &[T]) -> StatsResult<f64> {
    variance(data).map(f64::sqrt)
}

/// Computes the population standard deviation, `sqrt(pvariance(data))`.
///
/// # Errors
/// - [`StatsError::EmptyInput`] if `data` is empty.
///
/// # Examples
/// ```
/// use u_descriptive::pstdev;
/// let sd = pstdev(&[1, 2, 3, 4]).unwrap();
/// assert!((sd - 1.118033988749895).abs() < 1e-15);
/// ```
pub fn pstdev<T: AsPrimitive<f64>>(data: &[T]) -> StatsResult<f64> {
    pvariance(data).map(f64::sqrt)
}

fn sum_squared_deviations<T: AsPrimitive<f64>>(data: &[T]) -> StatsResult<f64> {
    let m = mean(data)?;
    Ok(data
        .iter()
        .map(|&x| {
            let d = x.as_() - m;
            d * d
        })
        .sum())
}

/// Clones and sorts `data` ascending.
///
/// A value that is not comparable with itself (NaN) rejects the whole
/// sample, which leaves `partial_cmp` total over the rest.
fn sorted_copy<T: PartialOrd + Clone>(data: &[T]) -> StatsResult<Vec<T>> {
    if data.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if data.iter().any(|x| x.partial_cmp(x).is_none()) {
        return Err(StatsError::Unordered);
    }
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    trace!("sorted copy of {} values", sorted.len());
    Ok(sorted)
}

// ---------------------------------------------------------------------------
// Compensated summation
// ---------------------------------------------------------------------------

/// Neumaier compensated summation.
///
/// An improved Kahan summation that also handles addends larger in
/// magnitude than the running sum, keeping the error O(ε) independent
/// of the number of terms.
///
/// An infinite term or an overflowing partial sum yields the plain IEEE
/// sum (`±inf`, or NaN for opposite infinities).
///
/// Reference: Neumaier (1974), *Zeitschrift für Angewandte Mathematik und
/// Mechanik* 54(1), pp. 39–51.
///
/// # Examples
/// ```
/// use u_descriptive::stats::kahan_sum;
/// assert_eq!(kahan_sum([1e16, 1.0, -1e16]), 1.0);
/// ```
pub fn kahan_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for x in values {
        let t = sum + x;
        if !t.is_finite() {
            // An infinite term or an overflow: the sum stays non-finite and
            // the compensation no longer means anything.
            sum = t;
            compensation = 0.0;
            continue;
        }
        let (big, small) = if sum.abs() >= x.abs() { (sum, x) } else { (x, sum) };
        compensation += (big - t) + small;
        sum = t;
    }
    if sum.is_finite() {
        sum + compensation
    } else {
        sum
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e6_f64..1e6, min_len..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn median_between_low_and_high(data in finite_vec(1, 100)) {
            let low = median_low(&data).unwrap();
            let mid = median(&data).unwrap().value();
            let high = median_high(&data).unwrap();
            prop_assert!(low <= mid, "median_low={} > median={}", low, mid);
            prop_assert!(mid <= high, "median={} > median_high={}", mid, high);
        }

        #[test]
        fn odd_length_medians_coincide(mut data in proptest::collection::vec(-1000_i32..1000, 1..=99)) {
            if data.len() % 2 == 0 {
                data.pop();
            }
            let low = median_low(&data).unwrap();
            let high = median_high(&data).unwrap();
            prop_assert_eq!(low, high);
            prop_assert_eq!(median(&data).unwrap(), Median::Middle(low));
        }

        #[test]
        fn pvariance_at_most_variance(data in finite_vec(2, 100)) {
            let var = variance(&data).unwrap();
            let pvar = pvariance(&data).unwrap();
            prop_assert!(pvar >= 0.0);
            prop_assert!(pvar <= var, "pvariance={} > variance={}", pvar, var);
        }

        #[test]
        fn stdev_is_sqrt_of_variance(data in finite_vec(2, 100)) {
            let var = variance(&data).unwrap();
            let sd = stdev(&data).unwrap();
            let diff = (sd * sd - var).abs();
            prop_assert!(diff < 1e-10 * var.max(1.0), "sd² should equal variance");
        }

        #[test]
        fn calls_are_pure(data in proptest::collection::vec(-50_i64..50, 2..=60)) {
            let before = data.clone();
            prop_assert_eq!(mean(&data), mean(&data));
            prop_assert_eq!(median(&data), median(&data));
            prop_assert_eq!(median_low(&data), median_low(&data));
            prop_assert_eq!(median_high(&data), median_high(&data));
            prop_assert_eq!(mode(&data), mode(&data));
            prop_assert_eq!(variance(&data), variance(&data));
            prop_assert_eq!(pvariance(&data), pvariance(&data));
            prop_assert_eq!(stdev(&data), stdev(&data));
            prop_assert_eq!(pstdev(&data), pstdev(&data));
            prop_assert_eq!(data, before);
        }

        #[test]
        fn modes_reach_highest_count(data in proptest::collection::vec(0_u8..6, 1..=50)) {
            let count = |v: u8| data.iter().filter(|&&x| x == v).count();
            let most = data.iter().map(|&x| count(x)).max().unwrap();
            let modes = mode(&data).unwrap();
            for &m in &modes {
                prop_assert_eq!(count(m), most);
            }
            let expected = (0_u8..6).filter(|&v| count(v) == most).count();
            prop_assert_eq!(modes.len(), expected);
        }
    }
}
