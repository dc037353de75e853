//! `methfinder` locates compact CpG-dense regions in amplicon sequences and
//! compares methylation levels between groups of bisulfite-sequenced clones.
//!
//! The crate has two halves:
//!
//! - [`window`] / [`site`]: find the shortest stretch of a sequence that
//!   contains at least `k` CpG (or TpG) sites, e.g. to design a bisulfite
//!   amplicon around a promoter region.
//! - [`matrix`], [`stats`] and [`compare`]: turn 0/1 methylation calls into
//!   per-sample or per-site percentages and run the usual nonparametric test
//!   battery on a control and a perturbation group.
//!
//! # Examples
//!
//! ```rust
//! use methfinder::find_shortest_window;
//!
//! let window = find_shortest_window("CGXXCGXXCG", 3).unwrap();
//! assert_eq!(window.as_str(), "CGXXCGXXC");
//! assert_eq!(window.len(), 9);
//! ```
//!
//! ```rust
//! use methfinder::{compare, datasets};
//!
//! let collagen = datasets::collagen();
//! let result = compare::compare_samples(&collagen).unwrap();
//! assert!(result.mann_whitney().pvalue() < 0.01);
//! ```
use statrs::StatsError;
use thiserror::Error;

pub mod compare;
pub mod datasets;
pub mod matrix;
pub mod site;
pub mod stats;
pub mod window;

pub use matrix::{Matrix, MethylationMatrix};
pub use site::{find_sites, Dinucleotide, Sites};
pub use window::{find_shortest_window, Window, WindowFinder};

/// Default number of CpG sites a window must span
pub const DEFAULT_MIN_SITES: usize = 11;

/// Dinucleotides that count as a site: `CG` and its bisulfite-converted
/// counterpart `TG`
pub const DEFAULT_PATTERNS: [Dinucleotide; 2] =
    [Dinucleotide::new(*b"CG"), Dinucleotide::new(*b"TG")];

/// If either group has at most this size (and there are no ties), the
/// Mann-Whitney U p-value is exact instead of the normal approximation
pub const EXACT_MWU_MAX_SAMPLES: usize = 8;

/// Expected number of sites in a typical amplicon, used for inline storage
const DEFAULT_NUM_SITES: usize = 32;

#[derive(Error, Debug, PartialEq)]
pub enum MethError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("not enough CpG sites: found {found}, required {required}")]
    InsufficientSites { found: usize, required: usize },
    #[error("sample does not contain any observations")]
    EmptySample,
    #[error("too few observations: found {found}, required {required}")]
    TooFewObservations { required: usize, found: usize },
    #[error("all observations are identical")]
    ConstantData,
    #[error("dimensions do not match the data")]
    DimensionMismatch,
    #[error("invalid distribution parameters")]
    Distribution,
}

impl From<StatsError> for MethError {
    fn from(_: StatsError) -> Self {
        MethError::Distribution
    }
}

pub type MethResult<T> = Result<T, MethError>;
