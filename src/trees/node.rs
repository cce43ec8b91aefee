use crate::data::dataset::{Party, Vote};
use crate::error::{Id3Error, Result};
use std::fmt::{self, Display, Formatter};

const BRANCH_VALUES: [Vote; 2] = [Vote::Yes, Vote::No];

/// Decision tree node
///
/// Every node keeps the indices of the training samples that reached it. Children of an internal
/// node are indexed by [`Vote::branch`]: slot 0 for `Yes`, slot 1 for `No`. A slot is empty when
/// no training sample took that value.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Leaf {
        label: Party,
        samples: Vec<usize>,
    },
    Internal {
        attribute: usize,
        samples: Vec<usize>,
        children: [Option<Box<TreeNode>>; 2],
    },
}

impl TreeNode {
    pub fn leaf(label: Party, samples: Vec<usize>) -> Self {
        TreeNode::Leaf { label, samples }
    }

    /// Creates a split on `attribute` with no children attached yet.
    pub fn internal(attribute: usize, samples: Vec<usize>) -> Self {
        TreeNode::Internal {
            attribute,
            samples,
            children: [None, None],
        }
    }

    /// Attaches `child` as the branch followed by records voting `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if `self` is a leaf or the branch already has a child.
    pub fn attach_child(&mut self, value: Vote, child: TreeNode) -> Result<()> {
        match self {
            TreeNode::Leaf { .. } => Err(Id3Error::LeafHasNoChildren),
            TreeNode::Internal { children, .. } => {
                let slot = &mut children[value.branch()];
                if slot.is_some() {
                    return Err(Id3Error::BranchOccupied(match value {
                        Vote::Yes => "positive",
                        Vote::No => "negative",
                    }));
                }
                *slot = Some(Box::new(child));
                Ok(())
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Predicted label, for leaves.
    pub fn label(&self) -> Option<Party> {
        match self {
            TreeNode::Leaf { label, .. } => Some(*label),
            TreeNode::Internal { .. } => None,
        }
    }

    /// Split attribute, for internal nodes.
    pub fn attribute(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { attribute, .. } => Some(*attribute),
        }
    }

    pub fn samples(&self) -> &[usize] {
        match self {
            TreeNode::Leaf { samples, .. } | TreeNode::Internal { samples, .. } => samples,
        }
    }

    /// Child followed by records voting `value`. Always `None` for leaves.
    pub fn child(&self, value: Vote) -> Option<&TreeNode> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Internal { children, .. } => children[value.branch()].as_deref(),
        }
    }

    /// Present children in branch order, paired with the vote that leads to them.
    pub fn children(&self) -> impl Iterator<Item = (Vote, &TreeNode)> + '_ {
        BRANCH_VALUES
            .into_iter()
            .filter_map(move |value| self.child(value).map(|child| (value, child)))
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.children()
            .map(|(_, child)| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    pub fn num_nodes(&self) -> usize {
        1 + self
            .children()
            .map(|(_, child)| child.num_nodes())
            .sum::<usize>()
    }

    pub fn num_leaves(&self) -> usize {
        if self.is_leaf() {
            return 1;
        }
        self.children().map(|(_, child)| child.num_leaves()).sum()
    }

    fn describe(&self) -> String {
        match self {
            TreeNode::Leaf { label, samples } => {
                format!("leaf: {} ({} samples)", label, samples.len())
            }
            TreeNode::Internal {
                attribute, samples, ..
            } => format!(
                "split on attribute #{} ({} samples)",
                attribute + 1,
                samples.len()
            ),
        }
    }

    fn fmt_children(&self, f: &mut Formatter<'_>, prefix: &str) -> fmt::Result {
        for (value, child) in self.children() {
            let path = format!("{}{}.", prefix, value.branch() + 1);
            writeln!(f, "{} [{}] {}", path, value, child.describe())?;
            child.fmt_children(f, &path)?;
        }
        Ok(())
    }
}

/// Hierarchical listing: the root, then each child in pre-order behind its depth-indexed path.
impl Display for TreeNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.describe())?;
        self.fmt_children(f, "")
    }
}
