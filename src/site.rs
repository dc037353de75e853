//! CpG site detection
//!
//! A site is the zero-based start index of a [`Dinucleotide`] inside a sequence.
//! By default both `CG` and `TG` count as a site, because bisulfite conversion
//! turns every unmethylated `CG` into `TG`.
//!
//! Every start index is tested, so overlapping matches are reported. For the
//! default patterns this never happens: both end with `G` and neither starts with `G`.
//!
//! ```rust
//! use methfinder::find_sites;
//!
//! let sites = find_sites("ACGTTGA");
//! assert_eq!(sites.as_slice(), &[1, 4]);
//! ```
use core::fmt::Debug;
use std::fmt::Display;

use smallvec::SmallVec;

use crate::{MethError, MethResult, DEFAULT_NUM_SITES, DEFAULT_PATTERNS};

/// The start positions of all sites of a sequence, in ascending order
pub type SiteList = SmallVec<[usize; DEFAULT_NUM_SITES]>;

/// A two-letter pattern that marks a site
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Dinucleotide {
    inner: [u8; 2],
}

impl Dinucleotide {
    /// Constructs a new `Dinucleotide` from two ASCII bytes
    pub const fn new(inner: [u8; 2]) -> Self {
        Self { inner }
    }

    /// Returns `true` if `window` starts with the pattern
    ///
    /// # Examples
    /// ```rust
    /// use methfinder::Dinucleotide;
    ///
    /// let cg = Dinucleotide::new(*b"CG");
    /// assert!(cg.matches(b"CGA"));
    /// assert!(!cg.matches(b"GC"));
    /// assert!(!cg.matches(b"C"));
    /// ```
    pub fn matches(&self, window: &[u8]) -> bool {
        window.len() >= 2 && window[..2] == self.inner
    }

    /// Returns the two bytes of the pattern
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.inner
    }
}

impl TryFrom<&str> for Dinucleotide {
    type Error = MethError;
    fn try_from(s: &str) -> MethResult<Self> {
        match s.as_bytes() {
            [a, b] if a.is_ascii() && b.is_ascii() => Ok(Self::new([*a, *b])),
            _ => Err(MethError::InvalidArgument(
                "a pattern must consist of exactly two ASCII characters",
            )),
        }
    }
}

impl Debug for Dinucleotide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Dinucleotide({self})")
    }
}

impl Display for Dinucleotide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.inner[0] as char, self.inner[1] as char)
    }
}

/// Iterates the start index of every pattern occurrence in a sequence
///
/// This struct is yielded by [`Sites::new`] and [`find_sites`]
pub struct Sites<'a> {
    sequence: &'a [u8],
    patterns: &'a [Dinucleotide],
    idx: usize,
}

impl<'a> Sites<'a> {
    /// Scans `sequence` for any of the `patterns`
    pub fn new(sequence: &'a str, patterns: &'a [Dinucleotide]) -> Self {
        Self {
            sequence: sequence.as_bytes(),
            patterns,
            idx: 0,
        }
    }
}

impl Iterator for Sites<'_> {
    type Item = usize;
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx + 1 < self.sequence.len() {
            let start = self.idx;
            // resume at the next byte, not after the match
            self.idx += 1;
            let window = &self.sequence[start..start + 2];
            if self.patterns.iter().any(|p| p.matches(window)) {
                return Some(start);
            }
        }
        None
    }
}

/// Returns the start index of every `CG` and `TG` in `sequence`
pub fn find_sites(sequence: &str) -> SiteList {
    Sites::new(sequence, &DEFAULT_PATTERNS).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sites_in_order() {
        let sites = find_sites("CGXXCGXXCG");
        assert_eq!(sites.as_slice(), &[0, 4, 8]);
    }

    #[test]
    fn no_sites() {
        assert!(find_sites("").is_empty());
        assert!(find_sites("C").is_empty());
        assert!(find_sites("GCGA").len() == 1);
        assert!(find_sites("AAAAACCCCGGGG").len() == 1);
        assert!(find_sites("AAAATTTTCCCC").is_empty());
    }

    #[test]
    fn tgg_checks_every_position() {
        // index 1 is tested (`GG`) but does not match
        let sites = find_sites("TGG");
        assert_eq!(sites.as_slice(), &[0]);
    }

    #[test]
    fn overlapping_custom_patterns() {
        let patterns = [Dinucleotide::new(*b"AA")];
        let sites: Vec<usize> = Sites::new("AAAA", &patterns).collect();
        assert_eq!(sites, vec![0, 1, 2]);

        let patterns = [Dinucleotide::new(*b"CG"), Dinucleotide::new(*b"GC")];
        let sites: Vec<usize> = Sites::new("CGCG", &patterns).collect();
        assert_eq!(sites, vec![0, 1, 2]);
    }

    #[test]
    fn case_sensitive() {
        assert!(find_sites("cgtg").is_empty());
        assert_eq!(find_sites("cgTG").as_slice(), &[2]);
    }

    #[test]
    fn site_count_grows_with_sequence() {
        let seq = "ACGTTGCATGCGCGTTTGA";
        let mut last = 0;
        for end in 0..=seq.len() {
            let count = find_sites(&seq[..end]).len();
            assert!(count >= last);
            last = count;
        }
        assert_eq!(last, 6);
    }

    #[test]
    fn multibyte_characters_are_skipped() {
        let sites = find_sites("äCGö TG");
        assert_eq!(sites.as_slice(), &[2, 7]);
    }

    #[test]
    fn parse_dinucleotide() {
        let cg = Dinucleotide::try_from("CG").unwrap();
        assert_eq!(cg, Dinucleotide::new(*b"CG"));
        assert_eq!(cg.to_string(), "CG");
        assert_eq!(format!("{cg:?}"), "Dinucleotide(CG)");

        assert!(Dinucleotide::try_from("C").is_err());
        assert!(Dinucleotide::try_from("CGA").is_err());
        assert!(Dinucleotide::try_from("Cä").is_err());
    }
}
