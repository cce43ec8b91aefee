use crate::error::{Id3Error, Result};
use nalgebra::{DMatrix, DVector};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::{rngs::StdRng, SeedableRng};
use std::fmt::{self, Display, Formatter};
use tracing::info;

/// Default proportion of records that go to the training subset.
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;

/// Value of a single yes/no attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Vote {
    No,
    Yes,
}

impl Vote {
    /// Position of the child that samples with this value are routed to.
    /// `Yes` is the positive branch (0), `No` the negative branch (1).
    pub fn branch(self) -> usize {
        match self {
            Vote::Yes => 0,
            Vote::No => 1,
        }
    }
}

impl Display for Vote {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Yes => write!(f, "yes"),
            Vote::No => write!(f, "no"),
        }
    }
}

/// Binary class label.
///
/// The declaration order matters: majority ties and the default fallback resolve to the first
/// variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Party {
    #[default]
    Democrat,
    Republican,
}

impl Party {
    pub fn index(self) -> usize {
        match self {
            Party::Democrat => 0,
            Party::Republican => 1,
        }
    }
}

impl Display for Party {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Party::Democrat => write!(f, "democrat"),
            Party::Republican => write!(f, "republican"),
        }
    }
}

/// Ordered store of fixed-width records: one row of `x` per record, its label in `y`.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub x: DMatrix<Vote>,
    pub y: DVector<Party>,
}

impl Display for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.nrows() == 0 {
            return writeln!(f, "No records to print.");
        }
        for i in 0..self.nrows() {
            writeln!(f, "Record #{}:", i + 1)?;
            for j in 0..self.ncols() {
                writeln!(f, "\tAttribute #{}: {}", j + 1, self.x[(i, j)])?;
            }
            writeln!(f, "\tLabel: {}", self.y[i])?;
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Dataset {
    /// Creates a dataset from an attribute matrix and a label vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the number of rows and the number of labels differ.
    pub fn new(x: DMatrix<Vote>, y: DVector<Party>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(Id3Error::DimensionMismatch {
                what: "labels",
                expected: x.nrows(),
                found: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Creates a dataset from `(attributes, label)` pairs. Every record must have the same arity.
    pub fn from_records(records: Vec<(Vec<Vote>, Party)>) -> Result<Self> {
        let ncols = records.first().map_or(0, |(attributes, _)| attributes.len());
        let mut values = Vec::with_capacity(records.len() * ncols);
        let mut labels = Vec::with_capacity(records.len());

        for (attributes, label) in records {
            if attributes.len() != ncols {
                return Err(Id3Error::DimensionMismatch {
                    what: "attributes",
                    expected: ncols,
                    found: attributes.len(),
                });
            }
            values.extend(attributes);
            labels.push(label);
        }

        Self::new(
            DMatrix::from_row_slice(labels.len(), ncols, &values),
            DVector::from_vec(labels),
        )
    }

    /// Whether the dataset holds at least one record, even one without attributes.
    pub fn is_not_empty(&self) -> bool {
        self.nrows() > 0
    }

    pub fn nrows(&self) -> usize {
        self.x.nrows()
    }

    /// Number of attributes per record.
    pub fn ncols(&self) -> usize {
        self.x.ncols()
    }

    /// Copies the records at `indices`, in that order, into a new dataset.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select_rows(indices),
            y: self.y.select_rows(indices),
        }
    }

    /// Partitions `samples` by the value of `attribute`: index 0 holds the samples voting `Yes`,
    /// index 1 those voting `No`. Relative order is preserved.
    ///
    /// # Panics
    ///
    /// Panics if a sample index is not a row of the dataset or `attribute` is not a column.
    pub fn split_on_attribute(&self, samples: &[usize], attribute: usize) -> [Vec<usize>; 2] {
        let (positive, negative): (Vec<usize>, Vec<usize>) = samples
            .iter()
            .partition(|&&index| self.x[(index, attribute)] == Vote::Yes);
        [positive, negative]
    }

    /// Number of samples carrying each label, indexed by [`Party::index`].
    ///
    /// # Panics
    ///
    /// Panics if a sample index is not a row of the dataset.
    pub fn label_counts(&self, samples: &[usize]) -> [usize; 2] {
        samples.iter().fold([0, 0], |mut counts, &index| {
            counts[self.y[index].index()] += 1;
            counts
        })
    }

    /// Most frequent label among `samples`. Ties go to `Party::Democrat`.
    ///
    /// # Panics
    ///
    /// Panics if a sample index is not a row of the dataset.
    pub fn majority_label(&self, samples: &[usize]) -> Party {
        let [democrats, republicans] = self.label_counts(samples);
        if democrats >= republicans {
            Party::Democrat
        } else {
            Party::Republican
        }
    }

    /// Splits the records into a training and a testing subset.
    ///
    /// # Arguments
    ///
    /// * `train_ratio` - Proportion of records assigned to the training subset.
    /// * `seed` - Seed of the shuffling generator. `None` seeds from system entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if `train_ratio` is not within `[0.0, 1.0]`.
    pub fn train_test_split(&self, train_ratio: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.train_test_split_with_rng(train_ratio, &mut rng)
    }

    /// Same as [`Dataset::train_test_split`], drawing the permutation from `rng`.
    ///
    /// The training subset holds the first `floor(n * train_ratio)` records of a uniform random
    /// permutation and the testing subset holds the rest, so every record lands in exactly one
    /// of them. The source dataset is left untouched.
    pub fn train_test_split_with_rng<R: Rng + ?Sized>(
        &self,
        train_ratio: f64,
        rng: &mut R,
    ) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_ratio) {
            return Err(Id3Error::InvalidRatio(train_ratio));
        }

        let mut indices = (0..self.nrows()).collect::<Vec<_>>();
        // Fisher-Yates; a no-op for zero or one element.
        indices.shuffle(rng);
        let train_size = (self.nrows() as f64 * train_ratio).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        info!(
            train = train_indices.len(),
            test = test_indices.len(),
            "split dataset"
        );

        Ok((self.select(train_indices), self.select(test_indices)))
    }
}
