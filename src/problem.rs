use crate::data::dataset::{Dataset, Party};
use crate::error::{Id3Error, Result};
use crate::trees::classifier::Id3Classifier;
use crate::trees::node::TreeNode;
use crate::trees::params::Id3Params;
use nalgebra::DVector;
use rand::Rng;

/// A training/testing split together with the tree grown from it.
///
/// The subsets are copied out of the source dataset, which may be dropped once the problem is
/// created. The tree stays absent until [`TrainingProblem::train`] is called.
#[derive(Clone, Debug)]
pub struct TrainingProblem {
    classifier: Id3Classifier,
    training: Dataset,
    testing: Dataset,
    train_ratio: f64,
}

impl TrainingProblem {
    /// Splits `dataset` with the ratio and seed configured in `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured ratio is outside `[0.0, 1.0]`.
    pub fn new(dataset: &Dataset, params: Id3Params) -> Result<Self> {
        let (training, testing) = dataset.train_test_split(params.train_ratio(), params.seed())?;
        Ok(Self::from_parts(training, testing, params))
    }

    /// Same as [`TrainingProblem::new`], drawing the split from `rng` instead of the seed.
    pub fn with_rng<R: Rng + ?Sized>(
        dataset: &Dataset,
        params: Id3Params,
        rng: &mut R,
    ) -> Result<Self> {
        let (training, testing) = dataset.train_test_split_with_rng(params.train_ratio(), rng)?;
        Ok(Self::from_parts(training, testing, params))
    }

    fn from_parts(training: Dataset, testing: Dataset, params: Id3Params) -> Self {
        let train_ratio = params.train_ratio();
        Self {
            classifier: Id3Classifier::with_params(params),
            training,
            testing,
            train_ratio,
        }
    }

    /// Builds the tree from the training subset. Once built, later calls return the same tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the training subset is empty.
    pub fn train(&mut self) -> Result<&TreeNode> {
        if self.classifier.root().is_none() {
            self.classifier.fit(&self.training)?;
        }
        self.classifier.root().ok_or(Id3Error::NotFitted)
    }

    /// Accuracy of the tree over the testing subset, 0 if that subset is empty.
    pub fn evaluate(&self) -> Result<f64> {
        self.classifier.evaluate(&self.testing)
    }

    /// Predicted labels of the testing subset, in its order.
    pub fn predictions(&self) -> Result<DVector<Party>> {
        self.classifier.predict(&self.testing.x)
    }

    pub fn tree(&self) -> Option<&TreeNode> {
        self.classifier.root()
    }

    pub fn classifier(&self) -> &Id3Classifier {
        &self.classifier
    }

    pub fn training(&self) -> &Dataset {
        &self.training
    }

    pub fn testing(&self) -> &Dataset {
        &self.testing
    }

    pub fn train_ratio(&self) -> f64 {
        self.train_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Vote;
    use rand::{rngs::StdRng, SeedableRng};

    // label is attribute 0 xor attribute 1; attribute 2 is noise
    fn votes_dataset(n: usize) -> Dataset {
        let vote = |v: bool| if v { Vote::Yes } else { Vote::No };
        let records = (0..n)
            .map(|i| {
                let (a, b, c) = (i % 2 == 0, (i / 2) % 2 == 0, (i / 4) % 3 == 0);
                let label = if a != b {
                    Party::Republican
                } else {
                    Party::Democrat
                };
                (vec![vote(a), vote(b), vote(c)], label)
            })
            .collect();
        Dataset::from_records(records).unwrap()
    }

    fn seeded_params(seed: u64) -> Id3Params {
        let mut params = Id3Params::new();
        params.set_seed(Some(seed));
        params
    }

    #[test]
    fn test_new_splits_dataset() {
        let dataset = votes_dataset(25);
        let problem = TrainingProblem::new(&dataset, seeded_params(1)).unwrap();
        drop(dataset);
        assert_eq!(problem.training().nrows(), 20);
        assert_eq!(problem.testing().nrows(), 5);
        assert_eq!(problem.train_ratio(), 0.8);
        assert!(problem.tree().is_none());
    }

    #[test]
    fn test_new_rejects_invalid_ratio() {
        let mut params = Id3Params::new();
        params.train_ratio = 2.0;
        assert!(matches!(
            TrainingProblem::new(&votes_dataset(4), params),
            Err(Id3Error::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_train_and_evaluate() {
        let dataset = votes_dataset(80);
        let mut problem = TrainingProblem::new(&dataset, seeded_params(5)).unwrap();
        let depth = problem.train().unwrap().depth();
        assert!(depth <= 3);

        // every label combination is seen many times, so the xor is learned exactly
        assert_eq!(problem.evaluate().unwrap(), 1.0);
        assert_eq!(problem.predictions().unwrap(), problem.testing().y);
    }

    #[test]
    fn test_train_is_idempotent() {
        let dataset = votes_dataset(30);
        let mut problem = TrainingProblem::new(&dataset, seeded_params(11)).unwrap();
        let first = problem.train().unwrap().clone();
        let second = problem.train().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_seed_builds_identical_trees() {
        let dataset = votes_dataset(30);
        let mut first = TrainingProblem::new(&dataset, seeded_params(3)).unwrap();
        let mut second = TrainingProblem::new(&dataset, seeded_params(3)).unwrap();
        assert_eq!(first.training(), second.training());
        assert_eq!(first.train().unwrap(), second.train().unwrap());
    }

    #[test]
    fn test_with_rng() {
        let dataset = votes_dataset(10);
        let mut rng = StdRng::seed_from_u64(8);
        let mut params = Id3Params::new();
        params.set_train_ratio(0.5).unwrap();
        let mut problem = TrainingProblem::with_rng(&dataset, params, &mut rng).unwrap();
        assert_eq!(problem.training().nrows(), 5);
        assert!(problem.train().is_ok());
    }

    #[test]
    fn test_empty_subsets() {
        let dataset = votes_dataset(3);

        let mut params = seeded_params(0);
        params.set_train_ratio(1.0).unwrap();
        let mut problem = TrainingProblem::new(&dataset, params).unwrap();
        problem.train().unwrap();
        assert_eq!(problem.testing().nrows(), 0);
        assert_eq!(problem.evaluate().unwrap(), 0.0);

        let mut params = seeded_params(0);
        params.set_train_ratio(0.0).unwrap();
        let mut problem = TrainingProblem::new(&dataset, params).unwrap();
        assert!(matches!(problem.train(), Err(Id3Error::EmptyTrainingSet)));
        assert!(problem.tree().is_none());
    }
}
