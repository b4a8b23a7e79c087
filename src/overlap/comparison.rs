//! Reader comparison: how my choseo's quote overlaps with other readers'.

use serde::{Deserialize, Serialize};

use crate::{log_debug, models::Choseo};

use super::config::{DissimilarityMode, OverlapConfig};
use super::ranking::{
    rank_by_ascending_similarity, rank_by_dissimilarity, rank_by_popularity, rank_by_similarity,
    RankedComparison,
};

const ENABLE_LOGS: bool = false;

/// Sort tabs on the comparison screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ComparisonSort {
    #[default]
    MostSimilar,
    MostDifferent,
    MostLiked,
}

impl ComparisonSort {
    pub fn apply(
        self,
        comparisons: Vec<RankedComparison>,
        config: &OverlapConfig,
    ) -> Vec<RankedComparison> {
        match self {
            ComparisonSort::MostSimilar => rank_by_similarity(comparisons),
            ComparisonSort::MostDifferent => match config.dissimilarity {
                DissimilarityMode::Reversal => {
                    rank_by_dissimilarity(rank_by_similarity(comparisons))
                }
                DissimilarityMode::AscendingScore => rank_by_ascending_similarity(comparisons),
            },
            ComparisonSort::MostLiked => rank_by_popularity(comparisons, |c| c.likes() as f64),
        }
    }
}

/// Score `mine` against every other reader's choseo on the same book.
///
/// The result keeps the order of `others`; pass it through
/// [`ComparisonSort::apply`] for a display order.
pub fn compare_with_readers(
    mine: &Choseo,
    others: &[Choseo],
    config: &OverlapConfig,
) -> Vec<RankedComparison> {
    let comparisons: Vec<RankedComparison> = others
        .iter()
        .filter(|other| other.id != mine.id && other.book_id == mine.book_id)
        .map(|other| RankedComparison::new(&mine.quote, other.clone(), config))
        .collect();

    log_debug!(
        "Compared choseo {} against {} readers on book {}",
        mine.id,
        comparisons.len(),
        mine.book_id
    );

    comparisons
}
