//! Display tiers for overlap scores.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OverlapTier {
    NearIdentical,
    Heavy,
    Partial,
    Slight,
}

impl OverlapTier {
    /// Tier for a whole percentage. Inclusive lower bounds: 80, 50, 30.
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            80.. => OverlapTier::NearIdentical,
            50..=79 => OverlapTier::Heavy,
            30..=49 => OverlapTier::Partial,
            _ => OverlapTier::Slight,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OverlapTier::NearIdentical => "거의 동일",
            OverlapTier::Heavy => "많이 겹침",
            OverlapTier::Partial => "부분 겹침",
            OverlapTier::Slight => "조금 겹침",
        }
    }

    pub fn style_class(&self) -> &'static str {
        match self {
            OverlapTier::NearIdentical => "overlap-tier-near-identical",
            OverlapTier::Heavy => "overlap-tier-heavy",
            OverlapTier::Partial => "overlap-tier-partial",
            OverlapTier::Slight => "overlap-tier-slight",
        }
    }
}

/// Badge data for rendering a score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TierBadge {
    pub tier: OverlapTier,
    pub label: String,
    pub style_class: String,
    pub percent: u32,
}

/// Map a score in [0, 1] to its badge. Non-finite scores fall into the lowest tier.
pub fn overlap_tier(score: f64) -> TierBadge {
    let percent = if score.is_finite() {
        (score * 100.0).round().clamp(0.0, 100.0) as u32
    } else {
        0
    };
    let tier = OverlapTier::from_percent(percent);
    TierBadge {
        tier,
        label: tier.label().to_string(),
        style_class: tier.style_class().to_string(),
        percent,
    }
}
