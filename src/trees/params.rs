use crate::data::dataset::{Party, DEFAULT_TRAIN_RATIO};
use crate::error::{Id3Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct Id3Params {
    pub train_ratio: f64,
    pub seed: Option<u64>,
    pub fallback_label: Party,
    pub parallel: bool,
}

impl Default for Id3Params {
    fn default() -> Self {
        Self::new()
    }
}

impl Id3Params {
    pub fn new() -> Self {
        Self {
            train_ratio: DEFAULT_TRAIN_RATIO,
            seed: None,
            fallback_label: Party::default(),
            parallel: true,
        }
    }

    pub fn set_train_ratio(&mut self, train_ratio: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&train_ratio) {
            return Err(Id3Error::InvalidRatio(train_ratio));
        }
        self.train_ratio = train_ratio;
        Ok(())
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Label returned when a record reaches a branch no training sample took.
    pub fn set_fallback_label(&mut self, fallback_label: Party) {
        self.fallback_label = fallback_label;
    }

    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    pub fn train_ratio(&self) -> f64 {
        self.train_ratio
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn fallback_label(&self) -> Party {
        self.fallback_label
    }

    pub fn parallel(&self) -> bool {
        self.parallel
    }
}
