//! Row and column access to methylation call matrices
//!
//! A methylation experiment is recorded as a matrix of calls: every row is one
//! sequenced molecule (clone), every column one CpG site of the amplicon.
//!
//! | Clone | CpG_1 | CpG_2 | CpG_3 | CpG_4 |
//! |:----- | -----:| -----:| -----:| -----:|
//! | **0** |     1 |     1 |     0 |     0 |
//! | **1** |     1 |     0 |     0 |     0 |
//! | **2** |     0 |     0 |     0 |     0 |
//!
//! [`Matrix`] is a borrowed, row-major view over such data, [`MethylationMatrix`]
//! owns the calls and computes methylation percentages.
//!
//! ```rust
//! use methfinder::Matrix;
//! let data = vec![1, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0];
//! let m = Matrix::new(3, 4, &data).unwrap();
//!
//! let per_clone: Vec<u32> = m.rows().map(|row| row.iter().sum()).collect();
//! assert_eq!(per_clone, vec![2, 1, 0]);
//!
//! let per_site: Vec<u32> = m.cols().map(|col| col.sum()).collect();
//! assert_eq!(per_site, vec![2, 1, 0, 0]);
//! ```
use std::fmt::Debug;

use crate::{MethError, MethResult};

mod methylation;
pub use methylation::MethylationMatrix;

/// A row-major view of `rows` x `cols` values
pub struct Matrix<'a, T> {
    rows: usize,
    cols: usize,
    data: &'a [T],
}

impl<'a, T> Matrix<'a, T> {
    /// Creates a new Matrix from `data` with `rows` number of rows, `cols` number of columns
    ///
    /// # Errors
    ///
    /// [`MethError::DimensionMismatch`] if `rows * cols` is not the length of `data`
    ///
    /// # Examples
    /// ```rust
    /// use methfinder::Matrix;
    /// let data = vec![11, 12, 13, 14, 21, 22, 23, 24, 31, 32, 33, 34];
    /// let m = Matrix::new(3, 4, &data).unwrap();
    /// assert_eq!(m.len(), 12);
    ///
    /// assert!(Matrix::new(3, 3, &data).is_err());
    /// ```
    pub fn new(rows: usize, cols: usize, data: &'a [T]) -> MethResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MethError::DimensionMismatch);
        }
        Ok(Self { rows, cols, data })
    }

    /// Returns the total length of the data
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the `Matrix` does not contain any data
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a Tuple with number of rows and number of columns
    pub fn dim(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the value at `row`, `col` or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<&'a T> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.data.get(row * self.cols + col)
    }

    /// Iterates the rows of the matrix as slices
    ///
    /// # Examples
    /// ```rust
    /// use methfinder::Matrix;
    /// let data = vec![11, 12, 13, 14, 21, 22, 23, 24, 31, 32, 33, 34];
    /// let m = Matrix::new(3, 4, &data).unwrap();
    ///
    /// let mut rows = m.rows();
    /// assert_eq!(rows.next().unwrap(), &[11, 12, 13, 14]);
    /// assert_eq!(rows.next().unwrap(), &[21, 22, 23, 24]);
    /// assert_eq!(rows.next().unwrap(), &[31, 32, 33, 34]);
    /// assert!(rows.next().is_none());
    /// ```
    pub fn rows(&self) -> std::slice::ChunksExact<'a, T> {
        // `chunks_exact` panics on 0, an empty matrix yields no rows anyway
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Iterates the columns of the matrix
    ///
    /// # Examples
    /// ```rust
    /// use methfinder::Matrix;
    /// let data = vec![11, 12, 13, 14, 21, 22, 23, 24, 31, 32, 33, 34];
    /// let m = Matrix::new(3, 4, &data).unwrap();
    ///
    /// let mut cols = m.cols();
    ///
    /// let col: Vec<&i32> = cols.next().unwrap().collect();
    /// assert_eq!(col, vec![&11, &21, &31]);
    ///
    /// assert_eq!(cols.next().unwrap().count(), 3);
    /// assert_eq!(cols.next().unwrap().count(), 3);
    /// assert_eq!(cols.next().unwrap().count(), 3);
    /// assert!(cols.next().is_none());
    /// ```
    pub fn cols(&self) -> ColumnIterator<'a, T> {
        ColumnIterator::new(self.data, self.cols)
    }
}

impl<T: std::fmt::Display> Debug for Matrix<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let v: Vec<String> = row.iter().map(|v| format!("{v}")).collect();
            writeln!(f, "[{}]", v.join(", "))?;
        }
        Ok(())
    }
}

/// The values of a single column of a `Matrix`, top to bottom
pub type Column<'a, T> = std::iter::StepBy<std::iter::Skip<std::slice::Iter<'a, T>>>;

/// Iterates the columns of a `Matrix`, returning an Iterator over individual column values
///
/// This struct is yielded by `Matrix::cols`
pub struct ColumnIterator<'a, T> {
    data: &'a [T],
    cols: usize,
    idx: usize,
}

impl<'a, T> ColumnIterator<'a, T> {
    fn new(data: &'a [T], cols: usize) -> Self {
        Self { data, cols, idx: 0 }
    }
}

impl<'a, T> Iterator for ColumnIterator<'a, T> {
    type Item = Column<'a, T>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.cols {
            return None;
        }
        let col = self.data.iter().skip(self.idx).step_by(self.cols);
        self.idx += 1;
        Some(col)
    }
}
