use tracing::{debug, warn};

use super::query_processor::QueryPart;
use super::result::SearchResult;
use crate::geo::{Position, QueryPosition, haversine_km};

/// Attaches the distance from `origin` to every result and sorts nearest first.
/// Ties keep their incoming order.
pub fn rank_by_distance(mut results: Vec<SearchResult>, origin: Position) -> Vec<SearchResult> {
    for result in &mut results {
        result.distance = Some(haversine_km(origin, result.coordinates));
    }

    results.sort_by(|a, b| {
        a.distance
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance.unwrap_or(f64::INFINITY))
    });
    results
}

/// Distance ranking for nearby parts. Without a position the results come back
/// untouched; the failure never reaches the caller.
pub async fn rank(
    results: Vec<SearchResult>,
    part: &QueryPart,
    position: &QueryPosition,
) -> Vec<SearchResult> {
    if !part.nearby || results.is_empty() {
        return results;
    }

    match position.get().await {
        Ok(origin) => {
            debug!(
                "Ranking {} result(s) for '{}' from {}, {}",
                results.len(),
                part.original_text,
                origin.latitude,
                origin.longitude
            );
            rank_by_distance(results, origin)
        }
        Err(e) => {
            warn!(
                "No position for nearby part '{}', returning unranked: {}",
                part.original_text, e
            );
            results
        }
    }
}


pub fn apply_cap(mut results: Vec<SearchResult>, part: &QueryPart, default_cap: usize) -> Vec<SearchResult> {
    results.truncate(part.result_limit(default_cap));
    results
}
