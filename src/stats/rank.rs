use smallvec::SmallVec;

/// Average ranks of a sample, along with the sizes of all tie groups
#[derive(Debug, Clone, PartialEq)]
pub struct Ranks {
    ranks: Vec<f64>,
    ties: SmallVec<[usize; 8]>,
}

impl Ranks {
    /// The 1-based rank of every observation, in input order
    pub fn as_slice(&self) -> &[f64] {
        &self.ranks
    }

    /// The number of observations in each group of tied values
    ///
    /// Only groups with more than one observation are listed
    pub fn ties(&self) -> &[usize] {
        &self.ties
    }

    /// Returns `true` if at least two observations share a value
    pub fn has_ties(&self) -> bool {
        !self.ties.is_empty()
    }

    /// The tie correction term `sum(t^3 - t)` over all tie groups
    pub fn tie_correction(&self) -> f64 {
        self.ties
            .iter()
            .map(|t| {
                let t = super::f64_from_usize(*t);
                t * t * t - t
            })
            .sum()
    }
}

/// Ranks `data` in ascending order, tied values get the average of their ranks
///
/// # Examples
/// ```rust
/// use methfinder::stats::rank;
///
/// let ranks = rank(&[3.0, 1.0, 4.0, 1.0, 5.0]);
/// assert_eq!(ranks.as_slice(), &[3.0, 1.5, 4.0, 1.5, 5.0]);
/// assert_eq!(ranks.ties(), &[2]);
/// ```
pub fn rank(data: &[f64]) -> Ranks {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|a, b| data[*a].total_cmp(&data[*b]));

    let mut ranks = vec![0.0; data.len()];
    let mut ties = SmallVec::new();

    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && data[order[end]] == data[order[start]] {
            end += 1;
        }
        // ranks are 1-based: positions start..end share the mean of start+1..=end
        let avg = super::f64_from_usize(start + end + 1) / 2.0;
        for idx in &order[start..end] {
            ranks[*idx] = avg;
        }
        if end - start > 1 {
            ties.push(end - start);
        }
        start = end;
    }

    Ranks { ranks, ties }
}
