use std::fmt;

use serde::{Deserialize, Serialize};

/// The four members of the energy score family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreVariant {
    Energy,
    OutcomeWeighted,
    ThresholdWeighted,
    VerticallyRescaled,
}

impl ScoreVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreVariant::Energy => "energy",
            ScoreVariant::OutcomeWeighted => "outcome_weighted",
            ScoreVariant::ThresholdWeighted => "threshold_weighted",
            ScoreVariant::VerticallyRescaled => "vertically_rescaled",
        }
    }

    /// Whether the variant consumes per-vector weights.
    pub fn is_weighted(&self) -> bool {
        matches!(
            self,
            ScoreVariant::OutcomeWeighted | ScoreVariant::VerticallyRescaled
        )
    }
}

impl fmt::Display for ScoreVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
