

pub mod models;
pub mod patterns;
pub mod processor;
pub mod segmenter;

pub use models::QueryPart;
pub use patterns::{CATEGORY_KEYWORDS, CategoryMatch, GAZETTEER, GazetteerEntry, NUMBER_WORDS, PROXIMITY_PHRASES};
pub use processor::QueryProcessor;
pub use segmenter::segment;
