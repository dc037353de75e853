use std::fmt::Debug;
use std::ops::Range;

use tracing::trace;

use crate::matrix::Matrix;
use crate::stats::f64_from_usize;
use crate::{MethError, MethResult};

/// Binary methylation calls of a group of clones
///
/// Rows are clones, columns are CpG sites. A call of `1` means the site was
/// methylated in that clone, `0` means unmethylated.
///
/// # Examples
/// ```rust
/// use methfinder::MethylationMatrix;
///
/// // 4 clones, 3 sites
/// let mut calls = MethylationMatrix::new(4, 3).unwrap();
/// calls.methylate(0..2, 0..3).unwrap();
///
/// assert_eq!(calls.sample_percentages(), vec![100.0, 100.0, 0.0, 0.0]);
/// assert_eq!(calls.site_percentages(), vec![50.0, 50.0, 50.0]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MethylationMatrix {
    rows: usize,
    cols: usize,
    calls: Vec<u8>,
}

impl MethylationMatrix {
    /// Constructs a new, fully unmethylated matrix
    ///
    /// # Errors
    ///
    /// [`MethError::DimensionMismatch`] if `rows * cols` overflows
    pub fn new(rows: usize, cols: usize) -> MethResult<Self> {
        let len = rows.checked_mul(cols).ok_or(MethError::DimensionMismatch)?;
        Ok(Self {
            rows,
            cols,
            calls: vec![0; len],
        })
    }

    /// Constructs a matrix from row-major calls
    ///
    /// # Errors
    ///
    /// - [`MethError::DimensionMismatch`] if `calls` does not have `rows * cols` entries
    /// - [`MethError::InvalidArgument`] if a call is neither `0` nor `1`
    pub fn from_calls(rows: usize, cols: usize, calls: Vec<u8>) -> MethResult<Self> {
        if rows.checked_mul(cols) != Some(calls.len()) {
            return Err(MethError::DimensionMismatch);
        }
        if calls.iter().any(|call| *call > 1) {
            return Err(MethError::InvalidArgument(
                "methylation calls must be 0 or 1",
            ));
        }
        Ok(Self { rows, cols, calls })
    }

    /// Marks all sites in `cols` of all clones in `rows` as methylated
    ///
    /// # Errors
    ///
    /// [`MethError::DimensionMismatch`] if a range exceeds the matrix
    pub fn methylate(&mut self, rows: Range<usize>, cols: Range<usize>) -> MethResult<()> {
        if rows.end > self.rows || cols.end > self.cols {
            return Err(MethError::DimensionMismatch);
        }
        trace!("Methylating clones {:?} at sites {:?}", rows, cols);
        for row in rows {
            let offset = row * self.cols;
            for col in cols.clone() {
                self.calls[offset + col] = 1;
            }
        }
        Ok(())
    }

    /// Returns whether the site `col` of clone `row` is methylated
    ///
    /// Returns `None` if the position is out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.view().get(row, col).map(|call| *call == 1)
    }

    /// Returns a Tuple with number of clones and number of sites
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns a borrowed [`Matrix`] of the calls
    pub fn view(&self) -> Matrix<'_, u8> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: &self.calls,
        }
    }

    /// The percentage of methylated sites of every clone
    ///
    /// A matrix without sites yields `0.0` for every clone.
    pub fn sample_percentages(&self) -> Vec<f64> {
        if self.cols == 0 {
            return vec![0.0; self.rows];
        }
        self.view()
            .rows()
            .map(|row| percentage(row.iter(), self.cols))
            .collect()
    }

    /// The percentage of clones that are methylated at every site
    ///
    /// A matrix without clones yields `0.0` for every site.
    pub fn site_percentages(&self) -> Vec<f64> {
        self.view()
            .cols()
            .map(|col| percentage(col, self.rows))
            .collect()
    }

    /// Column labels `CpG_1` to `CpG_n`
    pub fn site_labels(&self) -> Vec<String> {
        (1..=self.cols).map(|idx| format!("CpG_{idx}")).collect()
    }
}

fn percentage<'a, I: Iterator<Item = &'a u8>>(calls: I, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let methylated = calls.filter(|call| **call == 1).count();
    f64_from_usize(methylated) / f64_from_usize(total) * 100.0
}

impl Debug for MethylationMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MethylationMatrix({} x {})", self.rows, self.cols)?;
        write!(f, "{:?}", self.view())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unmethylated() {
        let m = MethylationMatrix::new(3, 4).unwrap();
        assert_eq!(m.dim(), (3, 4));
        assert_eq!(m.sample_percentages(), vec![0.0; 3]);
        assert_eq!(m.site_percentages(), vec![0.0; 4]);
    }

    #[test]
    fn dimensions_overflow() {
        assert_eq!(
            MethylationMatrix::new(usize::MAX, 2),
            Err(MethError::DimensionMismatch)
        );
        assert_eq!(MethylationMatrix::new(usize::MAX, 0).unwrap().dim(), (usize::MAX, 0));
    }

    #[test]
    fn methylate_block() {
        let mut m = MethylationMatrix::new(8, 9).unwrap();
        m.methylate(0..2, 0..3).unwrap();
        assert_eq!(m.get(0, 0), Some(true));
        assert_eq!(m.get(1, 2), Some(true));
        assert_eq!(m.get(2, 0), Some(false));
        assert_eq!(m.get(0, 3), Some(false));
        assert_eq!(m.get(8, 0), None);

        let samples = m.sample_percentages();
        assert!((samples[0] - 100.0 / 3.0).abs() < 1e-10);
        assert!((samples[1] - 100.0 / 3.0).abs() < 1e-10);
        assert!(samples[2..].iter().all(|p| *p == 0.0));

        let sites = m.site_percentages();
        assert_eq!(sites, vec![25.0, 25.0, 25.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn methylate_out_of_bounds() {
        let mut m = MethylationMatrix::new(2, 2).unwrap();
        assert_eq!(m.methylate(0..3, 0..1), Err(MethError::DimensionMismatch));
        assert_eq!(m.methylate(0..1, 1..3), Err(MethError::DimensionMismatch));
        assert_eq!(m, MethylationMatrix::new(2, 2).unwrap());
    }

    #[test]
    fn from_calls() {
        let m = MethylationMatrix::from_calls(2, 2, vec![1, 0, 1, 1]).unwrap();
        assert_eq!(m.sample_percentages(), vec![50.0, 100.0]);
        assert_eq!(m.site_percentages(), vec![100.0, 50.0]);

        assert_eq!(
            MethylationMatrix::from_calls(2, 2, vec![1, 0, 1]),
            Err(MethError::DimensionMismatch)
        );
        assert!(matches!(
            MethylationMatrix::from_calls(1, 2, vec![1, 2]),
            Err(MethError::InvalidArgument(_))
        ));
    }

    #[test]
    fn without_sites() {
        let m = MethylationMatrix::new(3, 0).unwrap();
        assert_eq!(m.sample_percentages(), vec![0.0; 3]);
        assert!(m.site_percentages().is_empty());
    }

    #[test]
    fn labels() {
        let m = MethylationMatrix::new(1, 3).unwrap();
        assert_eq!(m.site_labels(), vec!["CpG_1", "CpG_2", "CpG_3"]);
    }

    #[test]
    fn debug_output() {
        let mut m = MethylationMatrix::new(2, 2).unwrap();
        m.methylate(1..2, 0..1).unwrap();
        assert_eq!(format!("{m:?}"), "MethylationMatrix(2 x 2)\n[0, 0]\n[1, 0]\n");
    }
}
