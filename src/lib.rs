//! Natural-language points-of-interest search for Portugal's Centro region.

pub mod catalog;
pub mod core;
pub mod dialogue;
pub mod geo;
pub mod mcp;
pub mod search;
pub mod utils;

pub use utils::{format_km, safe_truncate, safe_truncate_ellipsis};


pub use catalog::{BoundingBox, Catalog, Category, Poi, PoiFilter};
pub use core::config::GuiaConfig;
pub use core::error::{CentroGuiaError, Result};
pub use geo::{Position, PositionProvider};
pub use search::{LocalSearch, QueryPart, SearchResult};


pub const DEFAULT_RESULT_CAP: usize = 5;


pub const DEFAULT_GEOLOCATION_TIMEOUT_MS: u64 = 5000;


pub const DEFAULT_PARSE_CACHE_SIZE: usize = 256;
