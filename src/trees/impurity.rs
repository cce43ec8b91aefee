//! Entropy and information gain over index subsets of a [`Dataset`].
use crate::data::dataset::{Dataset, Party};
use crate::error::{Id3Error, Result};

/// Binary entropy of a label distribution given as per-label counts.
///
/// An empty or single-label distribution has entropy 0.
pub fn entropy_of_counts(counts: [usize; 2]) -> f64 {
    let total = counts[0] + counts[1];
    if total == 0 {
        return 0.0;
    }
    let p = counts[Party::Republican.index()] as f64 / total as f64;
    if p == 0.0 || p == 1.0 {
        return 0.0;
    }
    let q = 1.0 - p;
    -p * p.log2() - q * q.log2()
}

/// Entropy of the labels of `samples`.
///
/// # Panics
///
/// Panics if a sample index is not a row of `dataset`.
pub fn entropy(dataset: &Dataset, samples: &[usize]) -> f64 {
    entropy_of_counts(dataset.label_counts(samples))
}

/// Information gain of splitting `samples` on `attribute`.
///
/// Returns 0 for an empty sample set or an out-of-range attribute, which is indistinguishable
/// from an attribute that carries no information. Use [`checked_information_gain`] to tell them
/// apart.
pub fn information_gain(dataset: &Dataset, samples: &[usize], attribute: usize) -> f64 {
    checked_information_gain(dataset, samples, attribute).unwrap_or(0.0)
}

/// Information gain of splitting `samples` on `attribute`.
///
/// # Errors
///
/// Returns an error if `samples` is empty or `attribute` is not a column of `dataset`.
///
/// # Panics
///
/// Panics if a sample index is not a row of `dataset`.
pub fn checked_information_gain(
    dataset: &Dataset,
    samples: &[usize],
    attribute: usize,
) -> Result<f64> {
    if attribute >= dataset.ncols() {
        return Err(Id3Error::AttributeOutOfRange {
            index: attribute,
            num_attributes: dataset.ncols(),
        });
    }
    if samples.is_empty() {
        return Err(Id3Error::EmptyRecords);
    }

    // counts[branch][label]
    let mut counts = [[0usize; 2]; 2];
    for &index in samples {
        let branch = dataset.x[(index, attribute)].branch();
        counts[branch][dataset.y[index].index()] += 1;
    }

    let parent = [counts[0][0] + counts[1][0], counts[0][1] + counts[1][1]];
    let total = samples.len() as f64;
    let weighted_entropy = counts
        .iter()
        .map(|branch| {
            let size = (branch[0] + branch[1]) as f64;
            size / total * entropy_of_counts(*branch)
        })
        .sum::<f64>();

    Ok(entropy_of_counts(parent) - weighted_entropy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::Vote;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn dataset(rows: &[(Vote, Party)]) -> Dataset {
        Dataset::from_records(rows.iter().map(|&(x, y)| (vec![x], y)).collect()).unwrap()
    }

    fn three_records() -> Dataset {
        dataset(&[
            (Vote::Yes, Party::Democrat),
            (Vote::Yes, Party::Democrat),
            (Vote::No, Party::Republican),
        ])
    }

    #[test]
    fn test_entropy_of_pure_set_is_zero() {
        let data = dataset(&[
            (Vote::Yes, Party::Republican),
            (Vote::No, Party::Republican),
        ]);
        assert_eq!(entropy(&data, &[0, 1]), 0.0);
    }

    #[test]
    fn test_entropy_of_even_split_is_one() {
        let data = dataset(&[
            (Vote::Yes, Party::Republican),
            (Vote::No, Party::Democrat),
        ]);
        assert_relative_eq!(entropy(&data, &[0, 1]), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_entropy_of_empty_set_is_zero() {
        assert_eq!(entropy(&three_records(), &[]), 0.0);
        assert_eq!(entropy_of_counts([0, 0]), 0.0);
    }

    #[test]
    fn test_perfect_split_gain_equals_entropy() {
        let data = three_records();
        let samples = [0, 1, 2];
        let h = entropy(&data, &samples);
        assert_relative_eq!(h, 0.9182958340544896, epsilon = 1e-9);
        assert_relative_eq!(information_gain(&data, &samples, 0), h, epsilon = 1e-12);
    }

    #[test]
    fn test_uninformative_attribute_has_zero_gain() {
        let data = dataset(&[
            (Vote::Yes, Party::Democrat),
            (Vote::Yes, Party::Republican),
            (Vote::No, Party::Democrat),
            (Vote::No, Party::Republican),
        ]);
        assert_relative_eq!(information_gain(&data, &[0, 1, 2, 3], 0), 0.0, epsilon = 1e-12);
        assert!(checked_information_gain(&data, &[0, 1, 2, 3], 0).is_ok());
    }

    #[test]
    fn test_precondition_failures() {
        let data = three_records();
        assert_eq!(information_gain(&data, &[0, 1, 2], 5), 0.0);
        assert_eq!(information_gain(&data, &[], 0), 0.0);
        assert!(matches!(
            checked_information_gain(&data, &[0, 1, 2], 5),
            Err(Id3Error::AttributeOutOfRange { index: 5, num_attributes: 1 })
        ));
        assert!(matches!(
            checked_information_gain(&data, &[], 0),
            Err(Id3Error::EmptyRecords)
        ));
    }

    proptest! {
        #[test]
        fn gain_is_bounded_by_entropy(
            rows in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..60),
            attribute in 0usize..2,
        ) {
            let records = rows
                .iter()
                .map(|&(a, b, label)| {
                    let vote = |v: bool| if v { Vote::Yes } else { Vote::No };
                    let party = if label { Party::Republican } else { Party::Democrat };
                    (vec![vote(a), vote(b)], party)
                })
                .collect();
            let data = Dataset::from_records(records).unwrap();
            let samples = (0..data.nrows()).collect::<Vec<_>>();

            let h = entropy(&data, &samples);
            let gain = information_gain(&data, &samples, attribute);
            prop_assert!(h >= 0.0 && h <= 1.0 + 1e-12);
            prop_assert!(gain >= -1e-12);
            prop_assert!(gain <= h + 1e-12);
        }
    }
}
