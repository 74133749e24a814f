use tracing::debug;

use super::query_processor::QueryPart;
use super::result::SearchResult;
use crate::catalog::{Catalog, Poi};

/// Catalog entries satisfying every constraint present on `part`, in catalog order.
///
/// An absent constraint is a wildcard. A part with no constraint at all matches nothing.
pub fn match_part(catalog: &Catalog, part: &QueryPart) -> Vec<SearchResult> {
    if part.is_unconstrained() {
        debug!("Part '{}' has no constraints, skipping", part.original_text);
        return Vec::new();
    }

    let location = part.location.as_deref().map(str::to_lowercase);
    let keywords: Vec<String> = if part.uses_keywords() {
        part.keywords.iter().map(|k| k.to_lowercase()).collect()
    } else {
        Vec::new()
    };

    let results: Vec<SearchResult> = catalog
        .iter()
        .filter(|poi| matches_poi(poi, part, location.as_deref(), &keywords))
        .map(|poi| SearchResult::from_poi(poi, part.original_text.as_str()))
        .collect();

    debug!(
        "Part '{}' matched {} POI(s)",
        part.original_text,
        results.len()
    );
    results
}

fn matches_poi(poi: &Poi, part: &QueryPart, location: Option<&str>, keywords: &[String]) -> bool {
    if let Some(category) = part.category {
        if poi.category != category {
            return false;
        }
    }

    if let Some(location) = location {
        if !poi.project.to_lowercase().contains(location) {
            return false;
        }
    }

    if !keywords.is_empty() {
        let name = poi.name.to_lowercase();
        let description = poi.description.to_lowercase();
        if !keywords
            .iter()
            .any(|keyword| name.contains(keyword.as_str()) || description.contains(keyword.as_str()))
        {
            return false;
        }
    }

    true
}
