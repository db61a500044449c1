use serde::{Deserialize, Serialize};

use crate::{DrillId, StatKey, StatMap};

/// A labeled training example: "for this attention profile, these drills were
/// appropriate".
///
/// Feature values are normalized attention scores in `[0, 1]` where values near
/// `1` mean the stat needs more attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub features: StatMap,
    pub labels: Vec<DrillId>,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidSampleError {
    #[display("training sample has no labels")]
    NoLabels,
    #[display("training sample feature {stat} = {value} is outside [0, 1]")]
    FeatureOutOfRange { stat: StatKey, value: f64 },
}

impl TrainingSample {
    #[must_use]
    pub fn new(features: impl Into<StatMap>, labels: impl Into<Vec<DrillId>>) -> Self {
        Self {
            features: features.into(),
            labels: labels.into(),
        }
    }

    /// Value of `feature`, with missing features reading as `0.0`.
    #[must_use]
    pub fn feature(&self, feature: StatKey) -> f64 {
        self.features.get_or_zero(feature)
    }

    /// Rejects samples without labels and non-finite or out-of-range features.
    pub fn validate(&self) -> Result<(), InvalidSampleError> {
        if self.labels.is_empty() {
            return Err(InvalidSampleError::NoLabels);
        }
        for (stat, value) in self.features.iter() {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidSampleError::FeatureOutOfRange { stat, value });
            }
        }
        Ok(())
    }
}
