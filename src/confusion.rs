//! Class set resolution and confusion matrix construction.
//!
//! These are the only stages of an evaluation that look at the raw labels.
//! Everything downstream works on the [`ConfusionMatrix`] alone.

use std::collections::BTreeSet;
use std::fmt;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::Serialize;

use crate::error::{Result, ScorerError};

// =============================================================================
// ClassSet
// =============================================================================

/// Ordered, duplicate-free set of the labels observed in either input array.
///
/// Class `i` of every per-class statistic refers to `classes[i]`. The order is
/// the total order of the label type, so identical inputs always resolve to
/// the identical ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClassSet<L> {
    labels: Vec<L>,
}

impl<L: Ord + Clone> ClassSet<L> {
    /// Resolve the sorted union of the distinct labels in both arrays.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::LengthMismatch`] if the arrays differ in length.
    pub fn from_labels(y_true: &[L], y_pred: &[L]) -> Result<Self> {
        check_lengths(y_true, y_pred)?;
        let union: BTreeSet<&L> = y_true.iter().chain(y_pred.iter()).collect();
        Ok(Self {
            labels: union.into_iter().cloned().collect(),
        })
    }
}

impl<L: Ord> ClassSet<L> {
    /// Position of `label` in the set, if present.
    #[inline]
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.labels.binary_search(label).ok()
    }
}

impl<L> ClassSet<L> {
    /// Number of classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn labels(&self) -> &[L] {
        &self.labels
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, L> {
        self.labels.iter()
    }
}

impl<'a, L> IntoIterator for &'a ClassSet<L> {
    type Item = &'a L;
    type IntoIter = std::slice::Iter<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

// =============================================================================
// ConfusionMatrix
// =============================================================================

/// N x N count matrix (row = true class, column = predicted class).
///
/// Row sums are the condition counts of each class and column sums the
/// predicted counts. All cells sum to the number of samples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    counts: Array2<u64>,
}

impl ConfusionMatrix {
    /// Cross-tabulate true against predicted labels over `classes`.
    ///
    /// # Errors
    ///
    /// Returns [`ScorerError::LengthMismatch`] if the arrays differ in length
    /// and [`ScorerError::UnknownLabel`] if a label is missing from `classes`
    /// (never the case for a class set resolved from the same arrays).
    pub fn from_labels<L: Ord + Clone>(
        classes: &ClassSet<L>,
        y_true: &[L],
        y_pred: &[L],
    ) -> Result<Self> {
        check_lengths(y_true, y_pred)?;
        let n = classes.len();
        let mut counts = Array2::<u64>::zeros((n, n));

        let position = |label: &L, sample: usize| {
            classes
                .index_of(label)
                .ok_or(ScorerError::UnknownLabel { sample })
        };

        for (k, (t, p)) in y_true.iter().zip(y_pred.iter()).enumerate() {
            counts[[position(t, k)?, position(p, k)?]] += 1;
        }

        Ok(Self { counts })
    }

    /// Wrap an existing square count matrix.
    ///
    /// # Panics
    ///
    /// Panics if `counts` is not square.
    pub fn from_counts(counts: Array2<u64>) -> Self {
        assert_eq!(
            counts.nrows(),
            counts.ncols(),
            "confusion matrix must be square"
        );
        Self { counts }
    }

    /// Number of classes.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.counts.nrows()
    }

    /// Total sample count.
    #[inline]
    pub fn total(&self) -> u64 {
        self.counts.sum()
    }

    /// Count of samples with true class `i` predicted as class `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.counts[[i, j]]
    }

    #[inline]
    pub fn view(&self) -> ArrayView2<'_, u64> {
        self.counts.view()
    }

    /// Row `i` (true class `i`).
    #[inline]
    pub fn row(&self, i: usize) -> ArrayView1<'_, u64> {
        self.counts.row(i)
    }

    /// Column `j` (predicted class `j`).
    #[inline]
    pub fn column(&self, j: usize) -> ArrayView1<'_, u64> {
        self.counts.column(j)
    }

    /// Condition count of each class (row sums).
    pub fn row_sums(&self) -> Vec<u64> {
        self.counts.sum_axis(Axis(1)).to_vec()
    }

    /// Predicted count of each class (column sums).
    pub fn column_sums(&self) -> Vec<u64> {
        self.counts.sum_axis(Axis(0)).to_vec()
    }

    /// Diagonal (correctly classified count of each class).
    pub fn diagonal(&self) -> Vec<u64> {
        self.counts.diag().to_vec()
    }

    /// The matrix as a vector of rows.
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.counts.rows().into_iter().map(|r| r.to_vec()).collect()
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .counts
            .iter()
            .map(|c| c.to_string().len())
            .max()
            .unwrap_or(1)
            + 1;
        for row in self.counts.rows() {
            for c in row {
                write!(f, "{:>width$}", c, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn check_lengths<L>(y_true: &[L], y_pred: &[L]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(ScorerError::LengthMismatch {
            n_true: y_true.len(),
            n_pred: y_pred.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CANONICAL_PRED, CANONICAL_TRUE};

    #[test]
    fn test_class_set_sorted_union() {
        let classes = ClassSet::from_labels(&[5, 1, 5, 9], &[1, 3, 3, 9]).unwrap();
        assert_eq!(classes.labels(), &[1, 3, 5, 9]);
        assert_eq!(classes.index_of(&5), Some(2));
        assert_eq!(classes.index_of(&4), None);
    }

    #[test]
    fn test_class_set_non_contiguous_negative_labels() {
        let classes = ClassSet::from_labels(&[-7, 100], &[100, 42]).unwrap();
        assert_eq!(classes.labels(), &[-7, 42, 100]);
    }

    #[test]
    fn test_class_set_length_mismatch() {
        let err = ClassSet::from_labels(&[0, 1, 1], &[0, 1]).unwrap_err();
        assert!(matches!(
            err,
            ScorerError::LengthMismatch {
                n_true: 3,
                n_pred: 2
            }
        ));
    }

    #[test]
    fn test_class_set_string_labels() {
        let t = ["cat", "dog", "cat"];
        let p = ["dog", "dog", "bird"];
        let classes = ClassSet::from_labels(&t, &p).unwrap();
        assert_eq!(classes.labels(), &["bird", "cat", "dog"]);
    }

    #[test]
    fn test_confusion_matrix_canonical() {
        let classes = ClassSet::from_labels(&CANONICAL_TRUE, &CANONICAL_PRED).unwrap();
        let cm = ConfusionMatrix::from_labels(&classes, &CANONICAL_TRUE, &CANONICAL_PRED).unwrap();

        assert_eq!(cm.to_rows(), vec![vec![3, 0, 0], vec![0, 1, 2], vec![2, 1, 3]]);
        assert_eq!(cm.total(), 12);
        assert_eq!(cm.row_sums(), vec![3, 3, 6]);
        assert_eq!(cm.column_sums(), vec![5, 2, 5]);
        assert_eq!(cm.diagonal(), vec![3, 1, 3]);
    }

    #[test]
    fn test_confusion_matrix_sums_to_samples() {
        let t = [3, 3, 8, 1, 8, 8, 1];
        let p = [8, 3, 8, 1, 1, 3, 1];
        let classes = ClassSet::from_labels(&t, &p).unwrap();
        let cm = ConfusionMatrix::from_labels(&classes, &t, &p).unwrap();
        assert_eq!(cm.total(), t.len() as u64);
        assert_eq!(cm.n_classes(), 3);
    }

    #[test]
    fn test_confusion_matrix_unknown_label() {
        let classes = ClassSet::from_labels(&[0, 1], &[1, 0]).unwrap();
        let err = ConfusionMatrix::from_labels(&classes, &[0, 2], &[1, 0]).unwrap_err();
        assert!(matches!(err, ScorerError::UnknownLabel { sample: 1 }));
    }

    #[test]
    fn test_confusion_matrix_display() {
        let cm = ConfusionMatrix::from_counts(ndarray::array![[5, 1], [2, 8]]);
        assert_eq!(cm.to_string(), " 5 1\n 2 8\n");
    }

    #[test]
    #[should_panic(expected = "square")]
    fn test_from_counts_rejects_non_square() {
        ConfusionMatrix::from_counts(Array2::zeros((2, 3)));
    }
}
