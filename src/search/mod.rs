//! Query interpretation and local search.
//!
//! utterance → [`segment`] → [`QueryProcessor::extract`] → [`match_part`] →
//! [`rank`] → [`apply_cap`] → [`merge_results`]

pub mod aggregator;
pub mod matcher;
pub mod query_processor;
pub mod ranking;
pub mod result;

pub use aggregator::{LocalSearch, merge_results};
pub use matcher::match_part;
pub use query_processor::{CategoryMatch, QueryPart, QueryProcessor, segment};
pub use ranking::{apply_cap, rank, rank_by_distance};
pub use result::SearchResult;
