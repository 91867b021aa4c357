//! Ranking: per-strategy base scores and the two fusion modes.

pub mod rrf_fusion;
pub mod scorer;
pub mod weighted_merge;

pub use rrf_fusion::{fuse, rrf_contribution, RankedList};
pub use scorer::score_entry;
pub use weighted_merge::{merge, StrategyWeights};
