//! Reference methylation datasets
//!
//! Clone-level bisulfite sequencing results of the skin aging experiments,
//! each with an untreated control and a perturbed group.
//!
//! - [`elovl`]: *ELOVL2* promoter amplicon, 9 CpG sites
//! - [`collagen`]: *COL1A1* amplicon, 11 CpG sites (cigarette smoke extract as perturbation)
use std::ops::Range;

use crate::MethylationMatrix;

/// A control and a perturbation group of the same amplicon
#[derive(Debug, Clone)]
pub struct Dataset {
    name: &'static str,
    control: MethylationMatrix,
    perturbation: MethylationMatrix,
}

impl Dataset {
    /// Constructs a new `Dataset`
    pub fn new(
        name: &'static str,
        control: MethylationMatrix,
        perturbation: MethylationMatrix,
    ) -> Self {
        Self {
            name,
            control,
            perturbation,
        }
    }

    /// The name of the dataset
    pub fn name(&self) -> &str {
        self.name
    }

    /// The calls of the control group
    pub fn control(&self) -> &MethylationMatrix {
        &self.control
    }

    /// The calls of the perturbation group
    pub fn perturbation(&self) -> &MethylationMatrix {
        &self.perturbation
    }
}

/// Builds a matrix from `(rows, sites)` blocks of methylated calls
///
/// All blocks are hardcoded below and lie within the matrix.
fn build(rows: usize, cols: usize, blocks: &[(Range<usize>, Range<usize>)]) -> MethylationMatrix {
    let mut calls = MethylationMatrix::new(rows, cols).expect("reference dimensions are small");
    for (clones, sites) in blocks {
        calls
            .methylate(clones.clone(), sites.clone())
            .expect("reference blocks are within bounds");
    }
    calls
}

/// *ELOVL2*: 8 control and 10 perturbed clones over 9 CpG sites
///
/// Two control clones are methylated at the first three sites. In the
/// perturbation group, four clones carry one to four methylated sites.
pub fn elovl() -> Dataset {
    let control = build(8, 9, &[(0..2, 0..3)]);
    let perturbation = build(
        10,
        9,
        &[(0..1, 0..1), (1..2, 0..2), (2..3, 0..3), (3..4, 0..4)],
    );
    Dataset::new("Elovl", control, perturbation)
}

/// *COL1A1*: 9 control and 5 perturbed clones over 11 CpG sites
///
/// Every control clone is methylated at the first site and four of them
/// also at the second one. The perturbed clones carry three to five
/// methylated sites.
pub fn collagen() -> Dataset {
    let control = build(9, 11, &[(0..9, 0..1), (0..4, 1..2)]);
    let perturbation = build(5, 11, &[(0..1, 0..5), (1..4, 0..4), (4..5, 0..3)]);
    Dataset::new("Collagen", control, perturbation)
}

#[cfg(test)]
mod test {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{a} != {e}");
        }
    }

    #[test]
    fn elovl_dimensions() {
        let data = elovl();
        assert_eq!(data.name(), "Elovl");
        assert_eq!(data.control().dim(), (8, 9));
        assert_eq!(data.perturbation().dim(), (10, 9));
    }

    #[test]
    fn elovl_percentages() {
        let data = elovl();
        let third = 100.0 / 3.0;
        let ninth = 100.0 / 9.0;
        assert_close(
            &data.control().sample_percentages(),
            &[third, third, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        assert_close(
            &data.perturbation().sample_percentages(),
            &[ninth, 2.0 * ninth, 3.0 * ninth, 4.0 * ninth, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        assert_close(
            &data.control().site_percentages(),
            &[25.0, 25.0, 25.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        assert_close(
            &data.perturbation().site_percentages(),
            &[40.0, 30.0, 20.0, 10.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
    }

    #[test]
    fn collagen_percentages() {
        let data = collagen();
        assert_eq!(data.control().dim(), (9, 11));
        assert_eq!(data.perturbation().dim(), (5, 11));

        let eleventh = 100.0 / 11.0;
        let control = data.control().sample_percentages();
        assert_close(&control[..4], &[2.0 * eleventh; 4]);
        assert_close(&control[4..], &[eleventh; 5]);
        assert_close(
            &data.perturbation().sample_percentages(),
            &[5.0 * eleventh, 4.0 * eleventh, 4.0 * eleventh, 4.0 * eleventh, 3.0 * eleventh],
        );

        let control = data.control().site_percentages();
        assert_close(&control[..2], &[100.0, 400.0 / 9.0]);
        assert!(control[2..].iter().all(|p| *p == 0.0));

        let perturbation = data.perturbation().site_percentages();
        assert_close(&perturbation[..5], &[100.0, 100.0, 100.0, 80.0, 20.0]);
        assert!(perturbation[5..].iter().all(|p| *p == 0.0));
    }
}
