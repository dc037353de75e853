use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use super::{f64_from_usize, rank, validate, TestResult};
use crate::{MethError, MethResult, EXACT_MWU_MAX_SAMPLES};

const NAME: &str = "Mann-Whitney U";

/// Two-sided Mann-Whitney U test
///
/// The returned statistic is `U` of the first group `x`. Samples without
/// ties where at least one group has up to [`EXACT_MWU_MAX_SAMPLES`]
/// observations are evaluated against the exact null distribution. All
/// others use the normal approximation with tie correction and continuity
/// correction.
///
/// # Errors
///
/// - [`MethError::EmptySample`] if a group is empty
/// - [`MethError::ConstantData`] if all observations are identical
///
/// # Examples
/// ```rust
/// use methfinder::stats::mann_whitney_u;
///
/// let result = mann_whitney_u(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
/// assert_eq!(result.statistic(), 0.0);
/// assert!((result.pvalue() - 2.0 / 252.0).abs() < 1e-12);
/// ```
pub fn mann_whitney_u(x: &[f64], y: &[f64]) -> MethResult<TestResult> {
    validate(x, 1)?;
    validate(y, 1)?;

    let n1 = x.len();
    let n2 = y.len();
    let combined: Vec<f64> = x.iter().chain(y.iter()).copied().collect();
    let ranks = rank(&combined);

    let nx = f64_from_usize(n1);
    let ny = f64_from_usize(n2);
    let rank_sum: f64 = ranks.as_slice()[..n1].iter().sum();
    let u1 = rank_sum - nx * (nx + 1.0) / 2.0;
    let u2 = nx * ny - u1;

    let small = n1 <= EXACT_MWU_MAX_SAMPLES || n2 <= EXACT_MWU_MAX_SAMPLES;
    let pvalue = if small && !ranks.has_ties() {
        debug!("Exact Mann-Whitney U for {} x {} observations", n1, n2);
        exact_pvalue(x, y)
    } else {
        let n = nx + ny;
        let mean = nx * ny / 2.0;
        let variance = nx * ny / 12.0 * ((n + 1.0) - ranks.tie_correction() / (n * (n - 1.0)));
        if variance <= 0.0 {
            return Err(MethError::ConstantData);
        }
        let z = (u1.max(u2) - mean - 0.5) / variance.sqrt();
        debug!("Mann-Whitney U normal approximation z = {}", z);
        2.0 * Normal::new(0.0, 1.0)?.sf(z)
    };

    Ok(TestResult::new(NAME, u1, pvalue.clamp(0.0, 1.0)))
}

/// Two-sided p-value from the exact distribution of `U`
///
/// Only valid without ties, so `U` is the number of pairs with `x > y`
fn exact_pvalue(x: &[f64], y: &[f64]) -> f64 {
    let u1: usize = x
        .iter()
        .map(|a| y.iter().filter(|b| a > *b).count())
        .sum();
    let u = u1.max(x.len() * y.len() - u1);

    let frequencies = u_frequencies(x.len(), y.len());
    let total: f64 = frequencies.iter().sum();
    let upper: f64 = frequencies[u..].iter().sum();
    2.0 * upper / total
}

/// Number of arrangements of `m` and `n` observations that produce each `U`
///
/// These are the coefficients of the Gaussian binomial
/// `prod_(k = 1..=s) (1 - q^(l + k)) / (1 - q^k)` with `s` and `l` the
/// smaller and the larger group size. Counts are kept as `f64`, they exceed
/// `u64` for a small group against a few hundred observations.
fn u_frequencies(m: usize, n: usize) -> Vec<f64> {
    let (small, large) = if m <= n { (m, n) } else { (n, m) };
    let mut freq = vec![0.0; m * n + 1];
    freq[0] = 1.0;
    for k in 1..=small {
        // divide by (1 - q^k)
        for u in k..freq.len() {
            freq[u] += freq[u - k];
        }
        // multiply by (1 - q^(large + k)), highest power first
        let shift = large + k;
        for u in (shift..freq.len()).rev() {
            freq[u] -= freq[u - shift];
        }
    }
    freq
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn frequencies_sum_to_binomial() {
        let freq = u_frequencies(3, 2);
        assert_eq!(freq, vec![1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 1.0]);
        assert_eq!(u_frequencies(2, 3), freq);
        assert_eq!(u_frequencies(8, 8).iter().sum::<f64>(), 12_870.0);
        assert_eq!(u_frequencies(0, 4), vec![1.0]);
    }

    #[test]
    fn exact_small_samples() {
        let result = mann_whitney_u(&[1.1, 2.2, 3.3, 7.7], &[0.5, 4.4, 5.5, 6.6]).unwrap();
        assert_close(result.statistic(), 7.0);
        assert_close(result.pvalue(), 0.885_714_285_714_285_7);
    }

    #[test]
    fn exact_is_symmetric() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [6.0, 7.0, 8.0, 9.0, 10.0];
        let forward = mann_whitney_u(&x, &y).unwrap();
        let backward = mann_whitney_u(&y, &x).unwrap();
        assert_close(forward.statistic(), 0.0);
        assert_close(backward.statistic(), 25.0);
        assert_close(forward.pvalue(), backward.pvalue());
    }

    #[test]
    fn per_sample_elovl() {
        let control = [3.0 / 9.0 * 100.0, 3.0 / 9.0 * 100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let mut perturbation: Vec<f64> = (1..=4).map(|c| f64::from(c) / 9.0 * 100.0).collect();
        perturbation.extend([0.0; 6]);
        let result = mann_whitney_u(&control, &perturbation).unwrap();
        assert_close(result.statistic(), 35.0);
        assert_close(result.pvalue(), 0.632_900_462_928_657_9);
    }

    #[test]
    fn exact_unequal_sizes() {
        let y: Vec<f64> = (4..=13).map(f64::from).collect();
        let result = mann_whitney_u(&[1.0, 2.0, 3.0], &y).unwrap();
        assert_close(result.statistic(), 0.0);
        assert_close(result.pvalue(), 2.0 / 286.0);

        let backward = mann_whitney_u(&y, &[1.0, 2.0, 3.0]).unwrap();
        assert_close(backward.statistic(), 30.0);
        assert_close(backward.pvalue(), 2.0 / 286.0);
    }

    #[test]
    fn exact_small_against_large() {
        let y: Vec<f64> = (0..400).map(|v| f64::from(v) + 0.5).collect();
        let result = mann_whitney_u(&[-3.0, -2.0, -1.0, 1000.0], &y).unwrap();
        assert_close(result.statistic(), 400.0);
        let frequencies = u_frequencies(4, 400);
        assert_eq!(frequencies.len(), 1601);
        assert_close(frequencies.iter().sum::<f64>(), 1_093_567_501.0);
        assert_close(result.pvalue(), 0.085_838_964_594_468_13);
    }

    #[test]
    fn ties_use_normal_approximation() {
        let y: Vec<f64> = (3..=12).map(f64::from).collect();
        let result = mann_whitney_u(&[1.0, 2.0, 3.0], &y).unwrap();
        assert_close(result.statistic(), 0.5);
        assert_close(result.pvalue(), 0.017_803_042_772_654_87);
    }

    #[test]
    fn per_sample_collagen() {
        let eleventh = 100.0 / 11.0;
        let mut control = vec![2.0 * eleventh; 4];
        control.extend([eleventh; 5]);
        let perturbation = [5.0 * eleventh, 4.0 * eleventh, 4.0 * eleventh, 4.0 * eleventh, 3.0 * eleventh];
        let result = mann_whitney_u(&control, &perturbation).unwrap();
        assert_close(result.statistic(), 0.0);
        assert_close(result.pvalue(), 0.002_292_364_036_538_874);
    }

    #[test]
    fn identical_groups() {
        assert_eq!(
            mann_whitney_u(&[1.0, 1.0], &[1.0, 1.0, 1.0]),
            Err(MethError::ConstantData)
        );
    }

    #[test]
    fn empty_group() {
        assert_eq!(mann_whitney_u(&[], &[1.0]), Err(MethError::EmptySample));
        assert_eq!(mann_whitney_u(&[1.0], &[]), Err(MethError::EmptySample));
    }

    #[test]
    fn pvalue_is_capped() {
        let result = mann_whitney_u(&[1.0, 2.0, 3.0], &[1.5, 2.5]).unwrap();
        assert!(result.pvalue() <= 1.0);
        assert_close(result.pvalue(), 1.0);
    }
}
