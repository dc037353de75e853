use std::fmt::Display;

use statrs::statistics::Statistics;

use super::{f64_from_usize, median_of_sorted, validate};
use crate::MethResult;

/// Descriptive statistics of a group, as shown next to a box plot
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    n: usize,
    mean: f64,
    std_dev: f64,
    min: f64,
    q1: f64,
    median: f64,
    q3: f64,
    max: f64,
}

impl Summary {
    /// Summarizes `data`
    ///
    /// The standard deviation is the sample standard deviation (`n - 1` in the
    /// denominator) and is `NaN` for a single observation. Quartiles are
    /// linearly interpolated between the closest ranks.
    ///
    /// # Errors
    ///
    /// [`MethError::EmptySample`](`crate::MethError::EmptySample`) if `data` is empty
    ///
    /// # Examples
    /// ```rust
    /// use methfinder::stats::Summary;
    ///
    /// let summary = Summary::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(summary.mean(), 2.5);
    /// assert_eq!(summary.median(), 2.5);
    /// assert_eq!(summary.q1(), 1.75);
    /// assert_eq!(summary.q3(), 3.25);
    /// ```
    pub fn from_slice(data: &[f64]) -> MethResult<Self> {
        validate(data, 1)?;
        let mut sorted = data.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            n: data.len(),
            mean: data.mean(),
            std_dev: data.std_dev(),
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: median_of_sorted(&sorted),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Number of observations
    pub fn n(&self) -> usize {
        self.n
    }

    /// Arithmetic mean
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Smallest observation
    pub fn min(&self) -> f64 {
        self.min
    }

    /// First quartile
    pub fn q1(&self) -> f64 {
        self.q1
    }

    /// Median, the mean of the two middle values for even `n`
    pub fn median(&self) -> f64 {
        self.median
    }

    /// Third quartile
    pub fn q3(&self) -> f64 {
        self.q3
    }

    /// Largest observation
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mean: {:.2}%, SD: {:.2}%", self.mean, self.std_dev)
    }
}

/// Linear interpolation between the closest ranks of sorted data
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = f64_from_usize(sorted.len() - 1) * p;
    let lower = h.floor();
    // `h` is within `0..len`, the truncation is exact
    let idx = lower as usize;
    let upper = (idx + 1).min(sorted.len() - 1);
    sorted[idx] + (h - lower) * (sorted[upper] - sorted[idx])
}
