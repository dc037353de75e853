use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal};
use tracing::debug;

use super::{f64_from_usize, median, rank, validate, TestResult};
use crate::{MethError, MethResult};

/// The location that deviations are measured from in [`levene`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Center {
    /// Brown-Forsythe variant, robust for skewed data
    #[default]
    Median,
    /// Levene's original test
    Mean,
}

impl Center {
    fn of(&self, data: &[f64]) -> f64 {
        match self {
            Center::Median => median(data),
            Center::Mean => data.iter().sum::<f64>() / f64_from_usize(data.len()),
        }
    }
}

/// Checks the groups and returns the total number of observations
fn validate_groups(groups: &[&[f64]]) -> MethResult<usize> {
    if groups.len() < 2 {
        return Err(MethError::InvalidArgument("at least two groups are required"));
    }
    for group in groups {
        validate(group, 1)?;
    }
    let total: usize = groups.iter().map(|g| g.len()).sum();
    if total <= groups.len() {
        return Err(MethError::TooFewObservations {
            required: groups.len() + 1,
            found: total,
        });
    }
    Ok(total)
}

/// Absolute deviations of every observation from the center of its group
fn deviations(groups: &[&[f64]], center: Center) -> Vec<Vec<f64>> {
    groups
        .iter()
        .map(|group| {
            let c = center.of(group);
            group.iter().map(|v| (v - c).abs()).collect()
        })
        .collect()
}

fn mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / f64_from_usize(data.len())
}

/// Levene's test for equal variances of `k` groups
///
/// The statistic follows an F distribution with `k - 1` and `N - k`
/// degrees of freedom.
///
/// # Errors
///
/// - [`MethError::InvalidArgument`] for fewer than two groups
/// - [`MethError::EmptySample`] if a group is empty
/// - [`MethError::ConstantData`] if all deviations from the center are equal
///
/// # Examples
/// ```rust
/// use methfinder::stats::{levene, Center};
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let c = [1.0, 1.0, 2.0, 2.0, 9.0];
/// let result = levene(&[&a, &b, &c], Center::Median).unwrap();
/// assert!((result.statistic() - 0.442_622_950_819_672).abs() < 1e-9);
/// assert!((result.pvalue() - 0.652_425_925_213_064_6).abs() < 1e-9);
/// ```
pub fn levene(groups: &[&[f64]], center: Center) -> MethResult<TestResult> {
    let total = validate_groups(groups)?;
    let k = f64_from_usize(groups.len());
    let n = f64_from_usize(total);

    let deviations = deviations(groups, center);
    let group_means: Vec<f64> = deviations.iter().map(|d| mean(d)).collect();
    let grand_mean = deviations.iter().flatten().sum::<f64>() / n;

    let between: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(d, m)| f64_from_usize(d.len()) * (m - grand_mean).powi(2))
        .sum();
    let within: f64 = deviations
        .iter()
        .zip(&group_means)
        .map(|(d, m)| d.iter().map(|v| (v - m).powi(2)).sum::<f64>())
        .sum();

    if within <= 0.0 {
        return Err(MethError::ConstantData);
    }

    let statistic = (n - k) * between / ((k - 1.0) * within);
    let pvalue = FisherSnedecor::new(k - 1.0, n - k)?.sf(statistic);
    debug!("Levene ({:?}) W = {}, p = {}", center, statistic, pvalue);
    Ok(TestResult::new("Levene", statistic, pvalue))
}

/// Fligner-Killeen test for equal variances of `k` groups
///
/// Absolute deviations from the group medians are ranked and transformed into
/// normal scores. The statistic follows a chi-squared distribution with
/// `k - 1` degrees of freedom.
///
/// # Errors
///
/// - [`MethError::InvalidArgument`] for fewer than two groups
/// - [`MethError::EmptySample`] if a group is empty
/// - [`MethError::ConstantData`] if all deviations from the medians are equal
///
/// # Examples
/// ```rust
/// use methfinder::stats::fligner_killeen;
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let c = [1.0, 1.0, 2.0, 2.0, 9.0];
/// let result = fligner_killeen(&[&a, &b, &c]).unwrap();
/// assert!((result.statistic() - 1.446_391_572_246_710_7).abs() < 1e-9);
/// assert!((result.pvalue() - 0.485_199_182_821_455_97).abs() < 1e-9);
/// ```
pub fn fligner_killeen(groups: &[&[f64]]) -> MethResult<TestResult> {
    let total = validate_groups(groups)?;
    let n = f64_from_usize(total);

    let deviations = deviations(groups, Center::Median);
    let flat: Vec<f64> = deviations.iter().flatten().copied().collect();
    let ranks = rank(&flat);

    let normal = Normal::new(0.0, 1.0)?;
    let scores: Vec<f64> = ranks
        .as_slice()
        .iter()
        .map(|r| normal.inverse_cdf(r / (2.0 * (n + 1.0)) + 0.5))
        .collect();

    let grand_mean = mean(&scores);
    let variance = scores
        .iter()
        .map(|s| (s - grand_mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    if variance <= 0.0 {
        return Err(MethError::ConstantData);
    }

    let mut offset = 0;
    let mut between = 0.0;
    for group in &deviations {
        let group_scores = &scores[offset..offset + group.len()];
        offset += group.len();
        between += f64_from_usize(group.len()) * (mean(group_scores) - grand_mean).powi(2);
    }

    let statistic = between / variance;
    let df = f64_from_usize(groups.len() - 1);
    let pvalue = ChiSquared::new(df)?.sf(statistic);
    debug!("Fligner-Killeen X2 = {}, p = {}", statistic, pvalue);
    Ok(TestResult::new("Fligner-Killeen", statistic, pvalue))
}
