use crate::data::dataset::Party;
use crate::error::{Id3Error, Result};
use nalgebra::{DVector, Matrix2};

/// Rows are true labels, columns predicted labels, both indexed by [`Party::index`].
pub type ConfusionMatrix = Matrix2<usize>;

/// Classification metrics for binary `Party` labels. `Republican` is the positive class.
pub trait ClassificationMetrics {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the two vectors have different lengths.
    fn confusion_matrix(
        &self,
        y_true: &DVector<Party>,
        y_pred: &DVector<Party>,
    ) -> Result<ConfusionMatrix> {
        if y_true.len() != y_pred.len() {
            return Err(Id3Error::DimensionMismatch {
                what: "predictions",
                expected: y_true.len(),
                found: y_pred.len(),
            });
        }

        let mut matrix = ConfusionMatrix::zeros();
        for (y_t, y_p) in y_true.iter().zip(y_pred.iter()) {
            matrix[(y_t.index(), y_p.index())] += 1;
        }
        Ok(matrix)
    }

    /// Computes the accuracy, `correct / total`. Empty input has accuracy 0.
    fn accuracy(&self, y_true: &DVector<Party>, y_pred: &DVector<Party>) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        if y_true.is_empty() {
            return Ok(0.0);
        }
        Ok(matrix.trace() as f64 / y_true.len() as f64)
    }

    /// Computes the precision, 0 when nothing was predicted positive.
    fn precision(&self, y_true: &DVector<Party>, y_pred: &DVector<Party>) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let positive = Party::Republican.index();
        let negative = Party::Democrat.index();

        let tp = matrix[(positive, positive)];
        let fp = matrix[(negative, positive)];
        if tp + fp == 0 {
            return Ok(0.0);
        }
        Ok(tp as f64 / (tp + fp) as f64)
    }

    /// Computes the recall, 0 when there are no positive labels.
    fn recall(&self, y_true: &DVector<Party>, y_pred: &DVector<Party>) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        let positive = Party::Republican.index();
        let negative = Party::Democrat.index();

        let tp = matrix[(positive, positive)];
        let fn_ = matrix[(positive, negative)];
        if tp + fn_ == 0 {
            return Ok(0.0);
        }
        Ok(tp as f64 / (tp + fn_) as f64)
    }

    /// Computes the F1 score based on the true labels and predicted labels.
    fn f1_score(&self, y_true: &DVector<Party>, y_pred: &DVector<Party>) -> Result<f64> {
        let precision = self.precision(y_true, y_pred)?;
        let recall = self.recall(y_true, y_pred)?;
        if precision + recall == 0.0 {
            return Ok(0.0);
        }
        Ok(2.0 * precision * recall / (precision + recall))
    }
}
