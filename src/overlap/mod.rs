pub mod comparison;
pub mod config;
pub mod ranking;
pub mod scorer;
pub mod tier;
pub mod tokenizer;

pub use comparison::{compare_with_readers, ComparisonSort};
pub use config::{DissimilarityMode, OverlapConfig, TokenNormalization};
pub use ranking::{
    rank_by_ascending_similarity, rank_by_dissimilarity, rank_by_popularity, rank_by_similarity,
    RankedComparison,
};
pub use scorer::{compute_overlap, compute_overlap_with, OverlapResult, OverlapSegment, TokenSet};
pub use tier::{overlap_tier, OverlapTier, TierBadge};
pub use tokenizer::{normalize_token, normalize_whitespace, tokenize};
