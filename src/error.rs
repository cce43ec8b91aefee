use thiserror::Error;

pub type Result<T> = std::result::Result<T, Id3Error>;

/// Errors surfaced by the top-level build, classify and loading entry points.
#[derive(Debug, Error)]
pub enum Id3Error {
    #[error("Train ratio should be between 0.0 and 1.0, got {0}.")]
    InvalidRatio(f64),

    #[error("Expected {expected} {what}, found {found}.")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Attribute index {index} is out of range for {num_attributes} attributes.")]
    AttributeOutOfRange { index: usize, num_attributes: usize },

    #[error("The record set is empty.")]
    EmptyRecords,

    #[error("Cannot build a tree from an empty training set.")]
    EmptyTrainingSet,

    #[error("Tree wasn't built yet.")]
    NotFitted,

    #[error("The {0} branch is already occupied.")]
    BranchOccupied(&'static str),

    #[error("A leaf node cannot have children.")]
    LeafHasNoChildren,

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("No valid records found.")]
    NoRecords,

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
