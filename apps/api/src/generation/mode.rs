use std::fmt;

use serde::{Deserialize, Serialize};

use crate::generation::prompts::{
    DEFAULT_INSTRUCTIONS, DEPTH_INSTRUCTIONS, EXPAND_INSTRUCTIONS, TIGHTEN_INSTRUCTIONS,
};

/// Selects the instruction block sent with a rewrite request. Carries no other state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Align the resume to the job while staying truthful.
    #[default]
    Default,
    /// Second-pass rewrite that adds implied mechanisms and validation detail.
    IncreaseTechnicalDepth,
    /// Shorten an overflowing document to one page.
    TightenToOnePage,
    /// Add implied detail to an underfilled single page.
    ExpandToFillOnePage,
}

impl GenerationMode {
    pub fn instructions(self) -> &'static str {
        match self {
            GenerationMode::Default => DEFAULT_INSTRUCTIONS,
            GenerationMode::IncreaseTechnicalDepth => DEPTH_INSTRUCTIONS,
            GenerationMode::TightenToOnePage => TIGHTEN_INSTRUCTIONS,
            GenerationMode::ExpandToFillOnePage => EXPAND_INSTRUCTIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GenerationMode::Default => "default",
            GenerationMode::IncreaseTechnicalDepth => "increase_technical_depth",
            GenerationMode::TightenToOnePage => "tighten_to_one_page",
            GenerationMode::ExpandToFillOnePage => "expand_to_fill_one_page",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
