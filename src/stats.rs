//! Statistical tests for comparing methylation levels between groups
//!
//! Methylation percentages of bisulfite clones are rarely normally distributed:
//! most clones are either fully unmethylated or carry only a few methylated sites.
//! This module therefore focuses on nonparametric tests:
//!
//! - [`shapiro_wilk`]: test a group for normality
//! - [`mann_whitney_u`]: two-sided test for a shift in location
//! - [`levene`] and [`fligner_killeen`]: tests for equal variances
//!
//! [`Summary`] provides the descriptive statistics (mean, SD, quartiles) that
//! accompany a comparison.
//!
//! # Examples
//!
//! ```rust
//! use methfinder::stats::{fligner_killeen, levene, mann_whitney_u, Center};
//!
//! let control = [18.2, 18.2, 18.2, 18.2, 9.1, 9.1, 9.1, 9.1, 9.1];
//! let perturbation = [45.5, 36.4, 36.4, 36.4, 27.3];
//!
//! let shift = mann_whitney_u(&control, &perturbation).unwrap();
//! assert!(shift.pvalue() < 0.01);
//!
//! let spread = levene(&[&control, &perturbation], Center::Median).unwrap();
//! assert!(spread.pvalue() > 0.05);
//!
//! let spread = fligner_killeen(&[&control, &perturbation]).unwrap();
//! assert!(spread.pvalue() > 0.05);
//! ```
use std::fmt::Display;

use crate::{MethError, MethResult};

mod mannwhitney;
mod rank;
mod shapiro;
mod summary;
mod variance;

pub use mannwhitney::mann_whitney_u;
pub use rank::{rank, Ranks};
pub use shapiro::shapiro_wilk;
pub use summary::Summary;
pub use variance::{fligner_killeen, levene, Center};

/// The statistic and p-value of a hypothesis test
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    name: &'static str,
    statistic: f64,
    pvalue: f64,
}

impl TestResult {
    /// Constructs a new `TestResult`
    pub fn new(name: &'static str, statistic: f64, pvalue: f64) -> Self {
        Self {
            name,
            statistic,
            pvalue,
        }
    }

    /// Returns the name of the test
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the test statistic
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Returns the p-value of the test
    ///
    /// The p-value indicates the probability of observing a statistic at least
    /// as extreme under the null hypothesis
    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }
}

impl Display for TestResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: statistic = {:.4}, p-value = {:.4}",
            self.name, self.statistic, self.pvalue
        )
    }
}

/// Checks that a group contains at least `required` finite values
fn validate(data: &[f64], required: usize) -> MethResult<()> {
    if data.is_empty() {
        return Err(MethError::EmptySample);
    }
    if data.iter().any(|v| !v.is_finite()) {
        return Err(MethError::InvalidArgument("observations must be finite"));
    }
    if data.len() < required {
        return Err(MethError::TooFewObservations {
            required,
            found: data.len(),
        });
    }
    Ok(())
}

/// Returns the median of already sorted data
///
/// `sorted` must not be empty
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn median(data: &[f64]) -> f64 {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    median_of_sorted(&sorted)
}

/// Group sizes are small, but we still want to
/// panic instead of silently losing precision.
pub(crate) fn f64_from_usize(n: usize) -> f64 {
    let intermediate: u32 = n
        .try_into()
        .expect("cannot safely create f64 from large usize");
    intermediate.into()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn medians() {
        assert!((median(&[3.0, 1.0, 2.0]) - 2.0).abs() < f64::EPSILON);
        assert!((median(&[4.0, 1.0, 3.0, 2.0]) - 2.5).abs() < f64::EPSILON);
        assert!((median(&[7.0]) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn validation() {
        assert_eq!(validate(&[], 1), Err(MethError::EmptySample));
        assert_eq!(
            validate(&[1.0, 2.0], 3),
            Err(MethError::TooFewObservations {
                required: 3,
                found: 2
            })
        );
        assert!(matches!(
            validate(&[1.0, f64::NAN, 2.0], 3),
            Err(MethError::InvalidArgument(_))
        ));
        assert!(validate(&[1.0, 2.0, 3.0], 3).is_ok());
    }

    #[test]
    fn display_result() {
        let result = TestResult::new("Mann-Whitney U", 35.0, 0.632_900_462);
        assert_eq!(
            result.to_string(),
            "Mann-Whitney U: statistic = 35.0000, p-value = 0.6329"
        );
    }
}
