//! Shortest sequence window spanning a minimum number of CpG sites
//!
//! The finder collects all [sites](`crate::site`) of a sequence and slides a
//! window of `k` consecutive sites over them. Window `i` starts at `sites[i]`
//! and ends (inclusive) at `sites[i + k - 1]`. The shortest window wins; on
//! ties the leftmost one is kept.
//!
//! ```rust
//! use methfinder::WindowFinder;
//!
//! let finder = WindowFinder::new().min_sites(2);
//! let window = finder.find("CGAAACGTGAAACG").unwrap();
//! assert_eq!(window.as_str(), "CGT");
//! assert_eq!((window.start(), window.end()), (5, 7));
//! ```
use core::fmt::Debug;
use std::fmt::Display;

use tracing::{debug, trace};

use crate::site::{Dinucleotide, SiteList, Sites};
use crate::{MethError, MethResult, DEFAULT_MIN_SITES, DEFAULT_PATTERNS};

/// A contiguous region of the input sequence
///
/// `start` and `end` are both inclusive byte offsets into the sequence. `end` is
/// the start of the last site, so the second base of that site is not part of the window.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    sequence: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Window<'a> {
    fn new(sequence: &'a str, start: usize, end: usize) -> Self {
        Self {
            sequence,
            start,
            end,
        }
    }

    /// The first position of the window
    pub fn start(&self) -> usize {
        self.start
    }

    /// The last position of the window (inclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the number of bases covered by the window
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// A window always covers at least one site, so it is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the subsequence covered by the window
    pub fn as_str(&self) -> &'a str {
        &self.sequence[self.start..=self.end]
    }
}

impl Debug for Window<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Window({}..={}: {})", self.start, self.end, self.as_str())
    }
}

impl Display for Window<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configurable search for the shortest CpG-dense window
///
/// Defaults to [`DEFAULT_MIN_SITES`] sites of either `CG` or `TG`.
#[derive(Debug, Clone)]
pub struct WindowFinder {
    min_sites: usize,
    patterns: Vec<Dinucleotide>,
}

impl Default for WindowFinder {
    fn default() -> Self {
        Self {
            min_sites: DEFAULT_MIN_SITES,
            patterns: DEFAULT_PATTERNS.to_vec(),
        }
    }
}

impl WindowFinder {
    /// Constructs a new [`WindowFinder`] with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of sites the window must span
    pub fn min_sites(mut self, min_sites: usize) -> Self {
        self.min_sites = min_sites;
        self
    }

    /// Replaces the dinucleotides that count as a site
    ///
    /// # Errors
    ///
    /// [`MethError::InvalidArgument`] if a pattern is not two ASCII characters
    ///
    /// # Examples
    /// ```rust
    /// use methfinder::WindowFinder;
    ///
    /// let finder = WindowFinder::new().min_sites(2).patterns(&["CG"]).unwrap();
    /// assert_eq!(finder.find("TGCGTGCG").unwrap().as_str(), "CGTGC");
    ///
    /// assert!(WindowFinder::new().patterns(&["CGA"]).is_err());
    /// ```
    pub fn patterns(mut self, patterns: &[&str]) -> MethResult<Self> {
        self.patterns = patterns
            .iter()
            .map(|p| Dinucleotide::try_from(*p))
            .collect::<MethResult<Vec<Dinucleotide>>>()?;
        Ok(self)
    }

    /// Returns the start index of every site in `sequence`
    pub fn sites(&self, sequence: &str) -> SiteList {
        Sites::new(sequence, &self.patterns).collect()
    }

    /// Finds the shortest window of `sequence` that spans `min_sites` sites
    ///
    /// # Errors
    ///
    /// - [`MethError::InvalidArgument`] if the sequence is empty, `min_sites` is `0`
    ///   or no patterns are configured
    /// - [`MethError::InsufficientSites`] if the sequence has fewer sites than required
    pub fn find<'a>(&self, sequence: &'a str) -> MethResult<Window<'a>> {
        if sequence.is_empty() {
            return Err(MethError::InvalidArgument("sequence must not be empty"));
        }
        if self.min_sites == 0 {
            return Err(MethError::InvalidArgument(
                "the minimum number of sites must be positive",
            ));
        }
        if self.patterns.is_empty() {
            return Err(MethError::InvalidArgument("at least one pattern is required"));
        }

        let sites = self.sites(sequence);
        debug!("Found {} sites: {:?}", sites.len(), sites.as_slice());

        if sites.len() < self.min_sites {
            return Err(MethError::InsufficientSites {
                found: sites.len(),
                required: self.min_sites,
            });
        }

        let mut best = Window::new(sequence, sites[0], sites[self.min_sites - 1]);
        for run in sites.windows(self.min_sites).skip(1) {
            let candidate = Window::new(sequence, run[0], run[self.min_sites - 1]);
            trace!("Candidate {:?}", candidate);
            // strictly shorter only, so the leftmost window wins ties
            if candidate.len() < best.len() {
                best = candidate;
            }
        }
        debug!("Shortest window {}..={} ({} bp)", best.start, best.end, best.len());
        Ok(best)
    }
}

/// Finds the shortest window of `sequence` spanning `min_count` `CG`/`TG` sites
///
/// # Errors
///
/// See [`WindowFinder::find`]
///
/// # Examples
/// ```rust
/// use methfinder::{find_shortest_window, MethError};
///
/// let window = find_shortest_window("CGXXCGXXCG", 3).unwrap();
/// assert_eq!(window.as_str(), "CGXXCGXXC");
/// assert_eq!(window.len(), 9);
///
/// assert_eq!(
///     find_shortest_window("CGCG", 3),
///     Err(MethError::InsufficientSites { found: 2, required: 3 })
/// );
/// ```
pub fn find_shortest_window(sequence: &str, min_count: usize) -> MethResult<Window<'_>> {
    WindowFinder::new().min_sites(min_count).find(sequence)
}
