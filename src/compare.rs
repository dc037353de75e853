//! Compare methylation between a control and a perturbation group
//!
//! A comparison runs the complete test battery:
//!
//! 1. Shapiro-Wilk normality test of each group
//! 2. Two-sided Mann-Whitney U test for a difference in location
//! 3. Levene's test (median-centred) and the Fligner-Killeen test for a
//!    difference in variance
//! 4. Descriptive statistics of both groups
//!
//! Groups can be compared per sample ([`compare_samples`]: one methylation
//! percentage per clone) or per site ([`compare_sites`]: one percentage per CpG site).
//!
//! # Examples
//!
//! ```rust
//! use methfinder::{compare, datasets};
//!
//! let elovl = datasets::elovl();
//! let result = compare::compare_sites(&elovl).unwrap();
//!
//! // no significant change in methylation
//! assert!(result.mann_whitney().pvalue() > 0.05);
//! println!("{}", result);
//! ```
use std::fmt::Display;

use tracing::{debug, warn};

use crate::datasets::Dataset;
use crate::stats::{fligner_killeen, levene, mann_whitney_u, shapiro_wilk, Center, Summary, TestResult};
use crate::{MethError, MethResult};

/// Whether the percentages were aggregated per clone or per CpG site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// One value per clone (row)
    Sample,
    /// One value per CpG site (column)
    Site,
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Sample => write!(f, "per sample"),
            Level::Site => write!(f, "per site"),
        }
    }
}

/// The results of all tests between a control and a perturbation group
#[derive(Debug, Clone)]
pub struct Comparison {
    name: String,
    level: Option<Level>,
    control: Summary,
    perturbation: Summary,
    control_normality: Option<TestResult>,
    perturbation_normality: Option<TestResult>,
    mann_whitney: TestResult,
    levene: TestResult,
    fligner: TestResult,
}

impl Comparison {
    /// Returns the name of the comparison, e.g. the dataset name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how the values were aggregated, if known
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Descriptive statistics of the control group
    pub fn control(&self) -> &Summary {
        &self.control
    }

    /// Descriptive statistics of the perturbation group
    pub fn perturbation(&self) -> &Summary {
        &self.perturbation
    }

    /// Shapiro-Wilk test of the control group
    ///
    /// `None` if the group has fewer than 3 values or all values are equal
    pub fn control_normality(&self) -> Option<&TestResult> {
        self.control_normality.as_ref()
    }

    /// Shapiro-Wilk test of the perturbation group
    ///
    /// `None` if the group has fewer than 3 values or all values are equal
    pub fn perturbation_normality(&self) -> Option<&TestResult> {
        self.perturbation_normality.as_ref()
    }

    /// Mann-Whitney U test for a difference in location
    pub fn mann_whitney(&self) -> &TestResult {
        &self.mann_whitney
    }

    /// Median-centred Levene test for a difference in variance
    pub fn levene(&self) -> &TestResult {
        &self.levene
    }

    /// Fligner-Killeen test for a difference in variance
    pub fn fligner(&self) -> &TestResult {
        &self.fligner
    }
}

/// Runs Shapiro-Wilk, but tolerates groups that cannot be tested
fn normality(group: &[f64], label: &str) -> MethResult<Option<TestResult>> {
    match shapiro_wilk(group) {
        Ok(result) => Ok(Some(result)),
        Err(err @ (MethError::TooFewObservations { .. } | MethError::ConstantData)) => {
            warn!("Skipping normality test of {}: {}", label, err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Compares two groups of methylation percentages
///
/// # Errors
///
/// - [`MethError::EmptySample`] if a group is empty
/// - [`MethError::ConstantData`] if the groups are too uniform for one of the tests
///
/// # Examples
/// ```rust
/// use methfinder::compare::compare;
///
/// let control = [0.0, 10.0, 20.0, 10.0, 0.0];
/// let perturbation = [40.0, 50.0, 60.0, 30.0];
/// let result = compare(&control, &perturbation).unwrap();
/// assert_eq!(result.control().mean(), 8.0);
/// assert_eq!(result.perturbation().mean(), 45.0);
/// ```
pub fn compare(control: &[f64], perturbation: &[f64]) -> MethResult<Comparison> {
    let control_summary = Summary::from_slice(control)?;
    let perturbation_summary = Summary::from_slice(perturbation)?;

    let control_normality = normality(control, "control")?;
    let perturbation_normality = normality(perturbation, "perturbation")?;

    let mann_whitney = mann_whitney_u(control, perturbation)?;
    let levene = levene(&[control, perturbation], Center::Median)?;
    let fligner = fligner_killeen(&[control, perturbation])?;
    debug!(
        "Compared {} control and {} perturbation values",
        control.len(),
        perturbation.len()
    );

    Ok(Comparison {
        name: String::from("Comparison"),
        level: None,
        control: control_summary,
        perturbation: perturbation_summary,
        control_normality,
        perturbation_normality,
        mann_whitney,
        levene,
        fligner,
    })
}

fn compare_dataset(dataset: &Dataset, level: Level) -> MethResult<Comparison> {
    let (control, perturbation) = match level {
        Level::Sample => (
            dataset.control().sample_percentages(),
            dataset.perturbation().sample_percentages(),
        ),
        Level::Site => (
            dataset.control().site_percentages(),
            dataset.perturbation().site_percentages(),
        ),
    };
    debug!("Comparing {} {}", dataset.name(), level);
    let mut result = compare(&control, &perturbation)?;
    result.name = dataset.name().to_string();
    result.level = Some(level);
    Ok(result)
}

/// Compares the per-clone methylation percentages of a dataset
///
/// # Errors
///
/// See [`compare`]
pub fn compare_samples(dataset: &Dataset) -> MethResult<Comparison> {
    compare_dataset(dataset, Level::Sample)
}

/// Compares the per-site methylation percentages of a dataset
///
/// # Errors
///
/// See [`compare`]
pub fn compare_sites(dataset: &Dataset) -> MethResult<Comparison> {
    compare_dataset(dataset, Level::Site)
}

impl Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.level {
            Some(level) => writeln!(f, "=== {} ({}) ===", self.name, level)?,
            None => writeln!(f, "=== {} ===", self.name)?,
        }

        writeln!(f, "Normality Test (Shapiro-Wilk):")?;
        for (label, test) in [
            ("Control", &self.control_normality),
            ("Perturbation", &self.perturbation_normality),
        ] {
            match test {
                Some(test) => writeln!(f, "{label}: p-value = {:.4}", test.pvalue())?,
                None => writeln!(f, "{label}: not applicable")?,
            }
        }

        writeln!(f)?;
        writeln!(f, "Test for Difference in Means (Mann-Whitney U test):")?;
        writeln!(f, "p-value = {:.4}", self.mann_whitney.pvalue())?;
        writeln!(f)?;
        writeln!(f, "Variance Test (Levene's Test):")?;
        writeln!(f, "p-value = {:.4}", self.levene.pvalue())?;
        writeln!(f)?;
        writeln!(f, "Variance Test (Fligner-Killeen Test):")?;
        writeln!(f, "p-value = {:.4}", self.fligner.pvalue())?;
        writeln!(f)?;
        writeln!(f, "Summary Statistics:")?;
        writeln!(f, "Control {}", self.control)?;
        write!(f, "Perturbation {}", self.perturbation)
    }
}
