//! ID3 Decision Tree Classifier
use super::node::TreeNode;
use super::params::Id3Params;
use super::selector::select_best;
use crate::data::dataset::{Dataset, Party, Vote};
use crate::error::{Id3Error, Result};
use crate::metrics::confusion::ClassificationMetrics;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, info, trace, warn};

/// ID3 decision tree over yes/no attributes.
///
/// Built once with [`Id3Classifier::fit`]; each attribute is split on at most once along any
/// root-to-leaf path, so the tree depth never exceeds the number of attributes.
#[derive(Clone, Debug)]
pub struct Id3Classifier {
    root: Option<Box<TreeNode>>,
    num_attributes: usize,
    params: Id3Params,
}

impl Default for Id3Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationMetrics for Id3Classifier {}

impl Id3Classifier {
    /// Creates a new classifier with default parameters.
    pub fn new() -> Self {
        Self::with_params(Id3Params::new())
    }

    pub fn with_params(params: Id3Params) -> Self {
        Self {
            root: None,
            num_attributes: 0,
            params,
        }
    }

    /// Sets the label returned for records that reach a branch never seen during training.
    pub fn set_fallback_label(&mut self, fallback_label: Party) {
        self.params.set_fallback_label(fallback_label)
    }

    /// Builds independent subtrees on the rayon thread pool when enabled.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.params.set_parallel(parallel)
    }

    pub fn params(&self) -> &Id3Params {
        &self.params
    }

    /// Root of the built tree, `None` until [`Id3Classifier::fit`] succeeds.
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_deref()
    }

    pub fn num_attributes(&self) -> usize {
        self.num_attributes
    }

    /// Builds the decision tree from a training dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The training records and their labels.
    ///
    /// # Errors
    ///
    /// Returns an error if the dataset is empty or its labels don't match its rows. On error the
    /// previously built tree, if any, is left untouched.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<()> {
        if dataset.y.len() != dataset.nrows() {
            return Err(Id3Error::DimensionMismatch {
                what: "labels",
                expected: dataset.nrows(),
                found: dataset.y.len(),
            });
        }
        if dataset.nrows() == 0 {
            return Err(Id3Error::EmptyTrainingSet);
        }

        let samples = (0..dataset.nrows()).collect::<Vec<_>>();
        let available = (0..dataset.ncols()).collect::<Vec<_>>();
        let root = self
            .build_tree(dataset, samples, &available)?
            .ok_or(Id3Error::EmptyTrainingSet)?;

        info!(
            nodes = root.num_nodes(),
            leaves = root.num_leaves(),
            depth = root.depth(),
            "finished building the tree"
        );
        self.num_attributes = dataset.ncols();
        self.root = Some(Box::new(root));
        Ok(())
    }

    fn build_tree(
        &self,
        dataset: &Dataset,
        samples: Vec<usize>,
        available: &[usize],
    ) -> Result<Option<TreeNode>> {
        if samples.is_empty() {
            return Ok(None);
        }

        let [democrats, republicans] = dataset.label_counts(&samples);
        if democrats == 0 || republicans == 0 {
            let label = if democrats == 0 {
                Party::Republican
            } else {
                Party::Democrat
            };
            return Ok(Some(TreeNode::leaf(label, samples)));
        }

        if available.is_empty() {
            let label = dataset.majority_label(&samples);
            return Ok(Some(TreeNode::leaf(label, samples)));
        }

        let best_split = match select_best(dataset, &samples, available, self.params.parallel) {
            Some(split) => split,
            None => {
                warn!(
                    samples = samples.len(),
                    "no attribute could be selected, falling back to the majority label"
                );
                let label = dataset.majority_label(&samples);
                return Ok(Some(TreeNode::leaf(label, samples)));
            }
        };
        debug!(
            attribute = best_split.attribute,
            gain = best_split.information_gain,
            samples = samples.len(),
            "split"
        );

        let [positive, negative] = dataset.split_on_attribute(&samples, best_split.attribute);
        let remaining = available
            .iter()
            .copied()
            .filter(|&attribute| attribute != best_split.attribute)
            .collect::<Vec<_>>();

        let build_branch = |group: Vec<usize>| -> Result<Option<TreeNode>> {
            if group.is_empty() {
                return Ok(None);
            }
            self.build_tree(dataset, group, &remaining)
        };
        let (positive_node, negative_node) = if self.params.parallel {
            rayon::join(|| build_branch(positive), || build_branch(negative))
        } else {
            (build_branch(positive), build_branch(negative))
        };

        let mut node = TreeNode::internal(best_split.attribute, samples);
        if let Some(child) = positive_node? {
            node.attach_child(Vote::Yes, child)?;
        }
        if let Some(child) = negative_node? {
            node.attach_child(Vote::No, child)?;
        }
        Ok(Some(node))
    }

    /// Predicts the label of a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree wasn't built yet or the record has the wrong number of
    /// attributes.
    pub fn classify(&self, record: &DVector<Vote>) -> Result<Party> {
        let root = self.root.as_ref().ok_or(Id3Error::NotFitted)?;
        if record.len() != self.num_attributes {
            return Err(Id3Error::DimensionMismatch {
                what: "attributes",
                expected: self.num_attributes,
                found: record.len(),
            });
        }
        Ok(self.make_prediction(record, root))
    }

    /// Predicts the labels of every row of `features`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree wasn't built yet or the number of columns differs from the
    /// training data.
    pub fn predict(&self, features: &DMatrix<Vote>) -> Result<DVector<Party>> {
        let root = self.root.as_ref().ok_or(Id3Error::NotFitted)?;
        if features.ncols() != self.num_attributes {
            return Err(Id3Error::DimensionMismatch {
                what: "attributes",
                expected: self.num_attributes,
                found: features.ncols(),
            });
        }
        let predictions: Vec<_> = features
            .row_iter()
            .map(|row| self.make_prediction(&row.transpose(), root))
            .collect();

        Ok(DVector::from_vec(predictions))
    }

    /// Fraction of `dataset` records whose label is predicted correctly.
    ///
    /// A dataset without records has accuracy 0. Records without attributes are still scored.
    pub fn evaluate(&self, dataset: &Dataset) -> Result<f64> {
        if !dataset.is_not_empty() {
            return Ok(0.0);
        }
        let predictions = self.predict(&dataset.x)?;
        self.accuracy(&dataset.y, &predictions)
    }

    fn make_prediction(&self, features: &DVector<Vote>, node: &TreeNode) -> Party {
        match node {
            TreeNode::Leaf { label, .. } => *label,
            TreeNode::Internal { attribute, .. } => match node.child(features[*attribute]) {
                Some(child) => self.make_prediction(features, child),
                None => {
                    trace!(
                        attribute,
                        fallback = %self.params.fallback_label,
                        "branch not covered by training data"
                    );
                    self.params.fallback_label
                }
            },
        }
    }
}
