//! Shapiro-Wilk test for normality
//!
//! Implements Royston's algorithm AS R94 (1995): the coefficients are
//! approximated from normal order statistics and the p-value is derived from
//! a normalising transformation of `W`.
#![allow(clippy::excessive_precision)]
#![allow(clippy::unreadable_literal)]

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_3, PI};

use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use super::{f64_from_usize, validate, TestResult};
use crate::{MethError, MethResult};

/// Polynomial coefficients for the largest weight `a_n`
const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.07119, 4.434685, -2.706056];
/// Polynomial coefficients for the second largest weight `a_(n-1)`
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
/// Mean of the transformed `W` for `4 <= n <= 11`
const C3: [f64; 4] = [0.544, -0.39978, 0.025054, -6.714e-4];
/// Log standard deviation of the transformed `W` for `4 <= n <= 11`
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
/// Mean of `ln(1 - W)` for `n >= 12`
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
/// Log standard deviation of `ln(1 - W)` for `n >= 12`
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
/// Upper bound of `ln(1 - W)` for small samples
const G: [f64; 2] = [-2.273, 0.459];

const SMALL: f64 = 1e-19;
/// Largest sample size covered by the small-sample approximation
const SMALL_SAMPLE: usize = 11;

/// Evaluates `cc[0] + cc[1] * x + cc[2] * x^2 + ...`
fn poly(cc: &[f64], x: f64) -> f64 {
    cc.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// The upper half of the antisymmetric weights, largest first
fn coefficients(n: usize, normal: &Normal) -> Vec<f64> {
    if n == 3 {
        return vec![FRAC_1_SQRT_2];
    }
    let half = n / 2;
    let an = f64_from_usize(n);

    let m: Vec<f64> = (1..=half)
        .map(|i| normal.inverse_cdf((f64_from_usize(i) - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();

    let mut a = vec![0.0; half];
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;
    a[0] = a1;

    let (first, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0].powi(2) - 2.0 * m[1].powi(2))
            / (1.0 - 2.0 * a1.powi(2) - 2.0 * a2.powi(2)))
        .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0].powi(2)) / (1.0 - 2.0 * a1.powi(2))).sqrt();
        (1, fac)
    };
    for (ai, mi) in a.iter_mut().zip(&m).skip(first) {
        *ai = -mi / fac;
    }
    a
}

/// Calculates `W` from sorted observations
fn w_statistic(sorted: &[f64], weights: &[f64]) -> MethResult<f64> {
    let n = sorted.len();
    let range = sorted[n - 1] - sorted[0];
    if range < SMALL {
        return Err(MethError::ConstantData);
    }

    let mut coef = vec![0.0; n];
    for (i, a) in weights.iter().enumerate() {
        coef[i] = -a;
        coef[n - 1 - i] = *a;
    }

    let an = f64_from_usize(n);
    let scaled: Vec<f64> = sorted.iter().map(|v| v / range).collect();
    let mean_x = scaled.iter().sum::<f64>() / an;
    let mean_a = coef.iter().sum::<f64>() / an;

    let mut ssa = 0.0;
    let mut ssx = 0.0;
    let mut sax = 0.0;
    for (a, x) in coef.iter().zip(&scaled) {
        let asa = a - mean_a;
        let xsx = x - mean_x;
        ssa += asa * asa;
        ssx += xsx * xsx;
        sax += asa * xsx;
    }

    let ssassx = (ssa * ssx).sqrt();
    Ok(1.0 - (ssassx - sax) * (ssassx + sax) / (ssa * ssx))
}

/// Upper tail probability of `W` under normality
fn upper_tail(w: f64, n: usize, normal: &Normal) -> f64 {
    if n == 3 {
        // exact for n = 3
        let pw = 6.0 / PI * (w.sqrt().asin() - FRAC_PI_3);
        return pw.max(0.0);
    }

    let an = f64_from_usize(n);
    let mut w1 = (1.0 - w).ln();
    let (m, s) = if n <= SMALL_SAMPLE {
        let gamma = poly(&G, an);
        if w1 >= gamma {
            return 1e-99;
        }
        w1 = -(gamma - w1).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    normal.sf((w1 - m) / s)
}

/// Shapiro-Wilk test for normality
///
/// Small p-values indicate that the data are unlikely to come from a
/// normal distribution.
///
/// # Errors
///
/// - [`MethError::TooFewObservations`] for less than 3 observations
/// - [`MethError::ConstantData`] if all observations are identical
///
/// # Examples
/// ```rust
/// use methfinder::stats::shapiro_wilk;
///
/// let weights = [148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0];
/// let result = shapiro_wilk(&weights).unwrap();
/// assert!((result.statistic() - 0.789).abs() < 1e-3);
/// assert!((result.pvalue() - 0.0067).abs() < 1e-4);
/// ```
pub fn shapiro_wilk(data: &[f64]) -> MethResult<TestResult> {
    validate(data, 3)?;
    let n = data.len();

    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let normal = Normal::new(0.0, 1.0)?;
    let weights = coefficients(n, &normal);
    let w = w_statistic(&sorted, &weights)?;
    let pvalue = upper_tail(w, n, &normal);
    debug!("Shapiro-Wilk n = {}, W = {}, p = {}", n, w, pvalue);
    Ok(TestResult::new("Shapiro-Wilk", w, pvalue))
}
