use super::impurity::checked_information_gain;
use crate::data::dataset::Dataset;
use rayon::prelude::*;

/// Attribute chosen for a split together with the gain it achieves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplitData {
    pub attribute: usize,
    pub information_gain: f64,
}

/// Picks the attribute of `available` with the highest information gain over `samples`.
///
/// The first attribute reaching the maximum wins; later candidates replace it only on strict
/// improvement. Gain is not required to be positive. Indices outside the dataset are skipped.
///
/// Returns `None` when `samples` or `available` is empty, or when no candidate is a valid column.
pub fn select_best(
    dataset: &Dataset,
    samples: &[usize],
    available: &[usize],
    parallel: bool,
) -> Option<SplitData> {
    if samples.is_empty() || available.is_empty() {
        return None;
    }

    let gain = |&attribute: &usize| {
        checked_information_gain(dataset, samples, attribute).map(|information_gain| SplitData {
            attribute,
            information_gain,
        })
    };

    // Collected in candidate order so the tie-break does not depend on scheduling.
    let candidates = if parallel {
        available.par_iter().map(gain).collect::<Vec<_>>()
    } else {
        available.iter().map(gain).collect::<Vec<_>>()
    };

    candidates
        .into_iter()
        .filter_map(Result::ok)
        .fold(None, |best: Option<SplitData>, candidate| match best {
            Some(best) if candidate.information_gain <= best.information_gain => Some(best),
            _ => Some(candidate),
        })
}
