use serde::{Deserialize, Serialize};

/// How tokens are keyed before membership is tested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum TokenNormalization {
    /// Exact surface-form equality: "세계이다." and "세계이다" do not match.
    #[default]
    Literal,
    /// Trailing punctuation is trimmed from the key; the surface form is kept for display.
    StripTrailingPunctuation,
}

/// What the "most different" view does with a similarity-sorted list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DissimilarityMode {
    /// Reverse the list as given.
    #[default]
    Reversal,
    /// Stable sort ascending by score.
    AscendingScore,
}

/// Configuration for quote overlap scoring and the comparison views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct OverlapConfig {
    pub normalization: TokenNormalization,
    pub dissimilarity: DissimilarityMode,
}
