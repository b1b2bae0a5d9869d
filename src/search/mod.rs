//! Component search: tokenization, tiered scoring and ranking.
//!
//! The scoring ladder in [`scoring`] is shared with the icon search.

pub mod engine;
pub mod related;
pub mod scoring;
pub mod tokenize;

pub use engine::{DEFAULT_LIMIT, SearchField, SearchOptions, SearchResult, search, search_all};
pub use scoring::{MatchType, TierMatch};
