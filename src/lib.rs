//! # Rusty-id3
//!
//! `rusty-id3` builds and evaluates binary-classification decision trees with the ID3 algorithm
//! over yes/no attributes. Trees are grown by information gain, every attribute is used at most
//! once along a root-to-leaf path, and inference falls back to a configurable label when a branch
//! was never exercised by the training data.
//!
//! ## Example Usage
//!
//! ```rust
//! use rusty_id3::data::dataset::{Dataset, Party, Vote};
//! use rusty_id3::trees::classifier::Id3Classifier;
//!
//! let dataset = Dataset::from_records(vec![
//!     (vec![Vote::Yes], Party::Democrat),
//!     (vec![Vote::Yes], Party::Democrat),
//!     (vec![Vote::No], Party::Republican),
//! ])
//! .unwrap();
//!
//! let mut model = Id3Classifier::new();
//! model.fit(&dataset).unwrap();
//!
//! let accuracy = model.evaluate(&dataset).unwrap();
//! assert_eq!(accuracy, 1.0);
//! ```

/// Records, labels and the train/test splitter
pub mod data;
/// Crate error type
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Training problem tying the split, the tree and the evaluation together
pub mod problem;
/// ID3 decision trees
pub mod trees;

pub use error::{Id3Error, Result};
