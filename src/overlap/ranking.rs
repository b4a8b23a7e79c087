//! Ordering helpers for reader comparison lists.
//!
//! Every sort here is stable (`slice::sort_by`), so equal keys keep their
//! input order and repeated calls give identical output.

use serde::{Deserialize, Serialize};

use crate::models::Choseo;

use super::config::OverlapConfig;
use super::scorer::{OverlapResult, TokenSet};

/// A candidate choseo scored against a reference quote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedComparison {
    pub reference: String,
    pub candidate: Choseo,
    pub overlap: OverlapResult,
}

impl RankedComparison {
    /// Score how much of `reference` appears in the candidate's quote.
    pub fn new(reference: &str, candidate: Choseo, config: &OverlapConfig) -> Self {
        let overlap = TokenSet::new(&candidate.quote, config.normalization).score(reference);
        Self {
            reference: reference.to_string(),
            candidate,
            overlap,
        }
    }

    pub fn score(&self) -> f64 {
        self.overlap.score
    }

    pub fn likes(&self) -> u32 {
        self.candidate.likes
    }
}

/// Descending by overlap score.
pub fn rank_by_similarity(mut candidates: Vec<RankedComparison>) -> Vec<RankedComparison> {
    candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
    candidates
}

/// The input order reversed, without looking at scores.
///
/// This only reads as "most different first" when the input is already sorted
/// by similarity. [`rank_by_ascending_similarity`] is the score-based variant.
pub fn rank_by_dissimilarity(mut candidates: Vec<RankedComparison>) -> Vec<RankedComparison> {
    candidates.reverse();
    candidates
}

/// Ascending by overlap score.
pub fn rank_by_ascending_similarity(
    mut candidates: Vec<RankedComparison>,
) -> Vec<RankedComparison> {
    candidates.sort_by(|a, b| a.score().total_cmp(&b.score()));
    candidates
}

/// Descending by a caller-supplied popularity key (e.g. like count).
pub fn rank_by_popularity<F>(
    mut candidates: Vec<RankedComparison>,
    popularity_of: F,
) -> Vec<RankedComparison>
where
    F: Fn(&RankedComparison) -> f64,
{
    candidates.sort_by(|a, b| popularity_of(b).total_cmp(&popularity_of(a)));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Reader;
    use chrono::{TimeZone, Utc};

    fn ranked(id: &str, score: f64, likes: u32) -> RankedComparison {
        RankedComparison {
            reference: "reference".into(),
            candidate: Choseo {
                id: id.into(),
                book_id: "demian".into(),
                reader: Reader {
                    id: format!("reader-{id}"),
                    nickname: id.into(),
                },
                quote: String::new(),
                reflection: String::new(),
                likes,
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            },
            overlap: OverlapResult {
                score,
                ..OverlapResult::empty()
            },
        }
    }

    fn ids(list: &[RankedComparison]) -> Vec<&str> {
        list.iter().map(|c| c.candidate.id.as_str()).collect()
    }

    #[test]
    fn similarity_is_descending_and_stable() {
        let input = vec![
            ranked("a", 0.5, 0),
            ranked("b", 0.9, 0),
            ranked("c", 0.5, 0),
            ranked("d", 0.1, 0),
            ranked("e", 0.9, 0),
        ];
        let once = rank_by_similarity(input.clone());
        assert_eq!(ids(&once), vec!["b", "e", "a", "c", "d"]);

        let twice = rank_by_similarity(input);
        assert_eq!(once, twice);
        assert_eq!(ids(&rank_by_similarity(once.clone())), ids(&once));
    }

    #[test]
    fn dissimilarity_reverses_sorted_input() {
        let input = vec![ranked("a", 0.9, 0), ranked("b", 0.5, 0), ranked("c", 0.1, 0)];
        assert_eq!(ids(&rank_by_dissimilarity(input)), vec!["c", "b", "a"]);
    }

    #[test]
    fn dissimilarity_is_a_reversal_not_a_sort() {
        let input = vec![ranked("a", 0.5, 0), ranked("b", 0.1, 0), ranked("c", 0.9, 0)];
        assert_eq!(ids(&rank_by_dissimilarity(input.clone())), vec!["c", "b", "a"]);
        assert_eq!(ids(&rank_by_ascending_similarity(input)), vec!["b", "a", "c"]);
    }

    #[test]
    fn ascending_similarity_is_stable() {
        let input = vec![ranked("a", 0.3, 0), ranked("b", 0.1, 0), ranked("c", 0.3, 0)];
        assert_eq!(ids(&rank_by_ascending_similarity(input)), vec!["b", "a", "c"]);
    }

    #[test]
    fn popularity_ignores_score_and_keeps_ties_in_order() {
        let input = vec![
            ranked("a", 0.9, 3),
            ranked("b", 0.1, 12),
            ranked("c", 0.5, 3),
            ranked("d", 0.7, 40),
        ];
        let ranked = rank_by_popularity(input, |c| c.likes() as f64);
        assert_eq!(ids(&ranked), vec!["d", "b", "a", "c"]);
        assert_eq!(ranked[0].overlap.score, 0.7);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(rank_by_similarity(Vec::new()).is_empty());
        assert!(rank_by_dissimilarity(Vec::new()).is_empty());
        assert!(rank_by_ascending_similarity(Vec::new()).is_empty());
        assert!(rank_by_popularity(Vec::new(), |c| c.likes() as f64).is_empty());
    }
}
