//! Classification quality metrics

use serde::Serialize;

use crate::corpus::Label;
use crate::error::{Result, SpamError};

fn check_lengths<T>(y_true: &[T], y_pred: &[T]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(SpamError::LengthMismatch {
            expected: y_true.len(),
            actual: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(SpamError::EmptyInput("no labels to compare".to_string()));
    }
    Ok(())
}

/// Fraction of predictions that differ from the true labels
pub fn misclassification_rate<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;

    let errors = y_true.iter().zip(y_pred).filter(|(t, p)| t != p).count();
    Ok(errors as f64 / y_true.len() as f64)
}

/// Ham/spam confusion counts, spam being the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix {
    /// Spam predicted as spam
    pub true_positives: u64,
    /// Ham predicted as spam
    pub false_positives: u64,
    /// Ham predicted as ham
    pub true_negatives: u64,
    /// Spam predicted as ham
    pub false_negatives: u64,
    /// Pairs where either label is neither ham nor spam
    pub other: u64,
}

impl ConfusionMatrix {
    pub fn from_labels(y_true: &[Label], y_pred: &[Label]) -> Result<Self> {
        check_lengths(y_true, y_pred)?;

        let mut matrix = Self::default();
        for (t, p) in y_true.iter().zip(y_pred) {
            match (t, p) {
                (Label::Spam, Label::Spam) => matrix.true_positives += 1,
                (Label::Ham, Label::Spam) => matrix.false_positives += 1,
                (Label::Ham, Label::Ham) => matrix.true_negatives += 1,
                (Label::Spam, Label::Ham) => matrix.false_negatives += 1,
                _ => matrix.other += 1,
            }
        }
        Ok(matrix)
    }

    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives + self.other
    }

    /// Spam precision, `None` when nothing was predicted spam
    pub fn precision(&self) -> Option<f64> {
        let predicted = self.true_positives + self.false_positives;
        (predicted > 0).then(|| self.true_positives as f64 / predicted as f64)
    }

    /// Spam recall, `None` when there is no true spam
    pub fn recall(&self) -> Option<f64> {
        let actual = self.true_positives + self.false_negatives;
        (actual > 0).then(|| self.true_positives as f64 / actual as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_misclassification_rate() {
        let y_true = vec![Label::Ham, Label::Spam, Label::Ham, Label::Ham];
        let y_pred = vec![Label::Ham, Label::Ham, Label::Ham, Label::Spam];
        assert_eq!(misclassification_rate(&y_true, &y_pred).unwrap(), 0.5);
    }

    #[test]
    fn test_misclassification_rate_perfect() {
        let labels = vec!["ham", "spam"];
        assert_eq!(misclassification_rate(&labels, &labels).unwrap(), 0.0);
    }

    #[test]
    fn test_misclassification_rate_length_mismatch() {
        let result = misclassification_rate(&[1, 2, 3], &[1, 2]);
        assert!(matches!(
            result,
            Err(SpamError::LengthMismatch { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_misclassification_rate_empty() {
        let empty: [u8; 0] = [];
        assert!(matches!(
            misclassification_rate(&empty, &empty),
            Err(SpamError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_confusion_matrix() {
        let y_true = vec![Label::Spam, Label::Spam, Label::Ham, Label::Ham, Label::Ham];
        let y_pred = vec![Label::Spam, Label::Ham, Label::Spam, Label::Ham, Label::Ham];

        let matrix = ConfusionMatrix::from_labels(&y_true, &y_pred).unwrap();
        assert_eq!(matrix.true_positives, 1);
        assert_eq!(matrix.false_negatives, 1);
        assert_eq!(matrix.false_positives, 1);
        assert_eq!(matrix.true_negatives, 2);
        assert_eq!(matrix.total(), 5);
        assert_eq!(matrix.precision(), Some(0.5));
        assert_eq!(matrix.recall(), Some(0.5));
    }

    #[test]
    fn test_confusion_matrix_other_labels() {
        let y_true = vec![Label::Other("unknown".to_string())];
        let y_pred = vec![Label::Spam];

        let matrix = ConfusionMatrix::from_labels(&y_true, &y_pred).unwrap();
        assert_eq!(matrix.other, 1);
        assert_eq!(matrix.precision(), None);
        assert_eq!(matrix.recall(), None);
    }
}
