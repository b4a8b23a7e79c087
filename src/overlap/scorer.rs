//! Quote overlap scoring.
//!
//! The score is the fraction of reference tokens whose key appears anywhere in
//! the comparison text. Alongside the score, the reference is split into
//! maximal runs of overlapping / non-overlapping tokens for highlighting.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::config::{OverlapConfig, TokenNormalization};
use super::tokenizer::{normalize_token, tokenize};

/// A maximal run of reference tokens sharing the same overlap status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OverlapSegment {
    pub text: String,
    pub is_overlap: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    /// matched_tokens / max(1, total_tokens), always within [0, 1].
    pub score: f64,
    pub matched_tokens: usize,
    pub total_tokens: usize,
    pub segments: Vec<OverlapSegment>,
}

impl OverlapResult {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            matched_tokens: 0,
            total_tokens: 0,
            segments: Vec::new(),
        }
    }

    /// Score as a whole percentage, `round(score * 100)`.
    pub fn percent(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }

    /// Segment texts joined with single spaces; equals the whitespace-normalized reference.
    pub fn joined_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Membership set derived from one comparison text.
///
/// Building it once and scoring many references against it avoids
/// re-tokenizing the same comparison text.
#[derive(Debug, Clone)]
pub struct TokenSet {
    normalization: TokenNormalization,
    keys: HashSet<String>,
}

impl TokenSet {
    pub fn new(comparison: &str, normalization: TokenNormalization) -> Self {
        let keys = tokenize(comparison)
            .into_iter()
            .map(|token| normalize_token(token, normalization).to_string())
            .collect();
        Self {
            normalization,
            keys,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.keys.contains(normalize_token(token, self.normalization))
    }

    /// Score `reference` against this set.
    pub fn score(&self, reference: &str) -> OverlapResult {
        let tokens = tokenize(reference);
        if tokens.is_empty() {
            return OverlapResult::empty();
        }

        let mut segments = Vec::new();
        let mut current: Option<(Vec<&str>, bool)> = None;
        let mut matched_tokens = 0usize;

        for &token in &tokens {
            let is_overlap = self.contains(token);
            if is_overlap {
                matched_tokens += 1;
            }

            match &mut current {
                Some((run, flag)) if *flag == is_overlap => run.push(token),
                _ => {
                    if let Some((run, flag)) = current.take() {
                        segments.push(OverlapSegment {
                            text: run.join(" "),
                            is_overlap: flag,
                        });
                    }
                    current = Some((vec![token], is_overlap));
                }
            }
        }

        if let Some((run, flag)) = current {
            segments.push(OverlapSegment {
                text: run.join(" "),
                is_overlap: flag,
            });
        }

        let total_tokens = tokens.len();
        OverlapResult {
            score: matched_tokens as f64 / total_tokens.max(1) as f64,
            matched_tokens,
            total_tokens,
            segments,
        }
    }
}

/// Score `reference` against `comparison` with literal token equality.
pub fn compute_overlap(reference: &str, comparison: &str) -> OverlapResult {
    compute_overlap_with(reference, comparison, &OverlapConfig::default())
}

pub fn compute_overlap_with(
    reference: &str,
    comparison: &str,
    config: &OverlapConfig,
) -> OverlapResult {
    TokenSet::new(comparison, config.normalization).score(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::tokenizer::normalize_whitespace;

    const DEMIAN_FULL: &str = "새는 알에서 나오려고 투쟁한다. 알은 세계이다.";
    const DEMIAN_HALF: &str = "새는 알에서 나오려고 투쟁한다.";

    fn segment(text: &str, is_overlap: bool) -> OverlapSegment {
        OverlapSegment {
            text: text.to_string(),
            is_overlap,
        }
    }

    #[test]
    fn scores_partial_quote() {
        let result = compute_overlap(DEMIAN_FULL, DEMIAN_HALF);

        assert_eq!(result.matched_tokens, 4);
        assert_eq!(result.total_tokens, 6);
        assert!((result.score - 4.0 / 6.0).abs() < 1e-9);
        assert_eq!(result.percent(), 67);
        assert_eq!(
            result.segments,
            vec![
                segment("새는 알에서 나오려고 투쟁한다.", true),
                segment("알은 세계이다.", false),
            ]
        );
    }

    #[test]
    fn self_overlap_is_total() {
        for text in [DEMIAN_FULL, "한 단어", "  여러   공백\t사이 ", "반복 반복 반복"] {
            let result = compute_overlap(text, text);
            assert_eq!(result.score, 1.0, "text: {text:?}");
            assert_eq!(result.segments.len(), 1);
            assert!(result.segments[0].is_overlap);
        }
    }

    #[test]
    fn empty_reference_scores_zero() {
        let result = compute_overlap("", "anything at all");
        assert_eq!(result.score, 0.0);
        assert!(result.segments.is_empty());

        let blank = compute_overlap(" \t\n", "anything");
        assert_eq!(blank.score, 0.0);
        assert!(blank.segments.is_empty());
    }

    #[test]
    fn empty_comparison_marks_everything_non_overlapping() {
        let result = compute_overlap(DEMIAN_FULL, "");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.segments, vec![segment(DEMIAN_FULL, false)]);
    }

    #[test]
    fn segments_partition_the_reference() {
        let cases = [
            (DEMIAN_FULL, DEMIAN_HALF),
            ("a b c d e f", "b d f"),
            ("  a\tb\n\nc  ", "c a"),
            ("x x y x", "x"),
            ("", "x"),
            ("one", ""),
        ];
        for (reference, comparison) in cases {
            let result = compute_overlap(reference, comparison);
            assert_eq!(result.joined_text(), normalize_whitespace(reference));
            assert!((0.0..=1.0).contains(&result.score));
            for pair in result.segments.windows(2) {
                assert_ne!(pair[0].is_overlap, pair[1].is_overlap);
            }
        }
    }

    #[test]
    fn alternating_runs_and_duplicate_reference_tokens() {
        let result = compute_overlap("x x y x", "x");
        assert_eq!(
            result.segments,
            vec![segment("x x", true), segment("y", false), segment("x", true)]
        );
        assert_eq!(result.matched_tokens, 3);
        assert_eq!(result.score, 0.75);
    }

    #[test]
    fn comparison_order_and_duplicates_do_not_matter() {
        let a = compute_overlap(DEMIAN_FULL, "투쟁한다. 새는 새는 알에서 나오려고");
        let b = compute_overlap(DEMIAN_FULL, DEMIAN_HALF);
        assert_eq!(a, b);
    }

    #[test]
    fn literal_mode_does_not_match_trailing_punctuation() {
        let result = compute_overlap("알은 세계이다.", "알은 세계이다");
        assert_eq!(result.score, 0.5);
    }

    #[test]
    fn strip_mode_matches_across_trailing_punctuation() {
        let config = OverlapConfig {
            normalization: TokenNormalization::StripTrailingPunctuation,
            ..OverlapConfig::default()
        };
        let result = compute_overlap_with("알은 세계이다.", "알은 세계이다", &config);
        assert_eq!(result.score, 1.0);
        assert_eq!(result.segments, vec![segment("알은 세계이다.", true)]);
    }

    #[test]
    fn token_set_is_reusable() {
        let set = TokenSet::new(DEMIAN_HALF, TokenNormalization::Literal);
        assert_eq!(set.len(), 4);
        let first = set.score(DEMIAN_FULL);
        let second = set.score(DEMIAN_FULL);
        assert_eq!(first, second);
        assert_eq!(set.score(DEMIAN_HALF).score, 1.0);
    }
}
