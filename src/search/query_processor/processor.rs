use tracing::{debug, info};

use super::models::QueryPart;
use super::patterns::{
    detect_nearby, extract_quantity, keyword_tokens, match_category, match_location,
};
use super::segmenter::segment;
use crate::core::cache::{CacheStats, QueryCache};
use crate::utils::safe_truncate_ellipsis;

/// Turns a raw utterance into structured query parts.
pub struct QueryProcessor {
    cache: QueryCache<Vec<QueryPart>>,
}

impl QueryProcessor {
    pub fn new(cache_size: usize) -> Self {
        Self {
            cache: QueryCache::new(cache_size),
        }
    }


    pub fn process(&self, query: &str) -> Vec<QueryPart> {
        let key = QueryCache::<Vec<QueryPart>>::make_key(query);
        if key.is_empty() {
            return Vec::new();
        }

        if let Some(parts) = self.cache.get(&key) {
            debug!("Parse cache hit for '{}'", safe_truncate_ellipsis(&key, 50));
            return parts;
        }

        let parts: Vec<QueryPart> = segment(query)
            .iter()
            .flat_map(|segment| self.extract(segment))
            .collect();

        info!(
            "Query '{}' produced {} part(s)",
            safe_truncate_ellipsis(&key, 50),
            parts.len()
        );

        self.cache.set(&key, parts.clone());
        parts
    }

    /// Extracts zero or more parts from one segment. Ambiguous category keywords
    /// fan out into one part per category.
    pub fn extract(&self, segment: &str) -> Vec<QueryPart> {
        let segment = segment.trim().to_lowercase();
        if segment.is_empty() {
            return Vec::new();
        }

        let quantity = extract_quantity(&segment);
        let nearby = detect_nearby(&segment);
        let location = match_location(&segment).map(|entry| entry.name);

        let mut base = QueryPart::new(segment.as_str()).nearby(nearby);
        base.quantity = quantity;
        base.location = location.map(str::to_string);

        match match_category(&segment) {
            Some((keyword, found)) => {
                debug!(
                    "Segment '{}' matched keyword '{}' -> {:?}",
                    segment, keyword, found
                );
                found
                    .categories()
                    .iter()
                    .map(|category| base.clone().with_category(*category))
                    .collect()
            }
            // A place name alone is the whole constraint; leftover words stay out of matching.
            None if base.location.is_some() => {
                debug!("Segment '{}' is location-only", segment);
                vec![base]
            }
            None => {
                let keywords = keyword_tokens(&segment);
                debug!("Segment '{}' in keyword mode: {:?}", segment, keywords);
                vec![base.with_keywords(keywords)]
            }
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl Default for QueryProcessor {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PARSE_CACHE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_category_and_location() {
        let parts = QueryProcessor::default().process("museus em coimbra");
        assert_eq!(
            parts,
            vec![QueryPart::new("museus em coimbra")
                .with_category(Category::Museums)
                .with_location("coimbra")]
        );
    }

    #[test]
    fn test_quantity_and_nearby() {
        let parts = QueryProcessor::default().process("3 restaurantes perto de mim");
        assert_eq!(parts.len(), 1);
        let part = &parts[0];
        assert_eq!(part.category, Some(Category::Restaurants));
        assert_eq!(part.quantity, Some(3));
        assert!(part.nearby);
        assert!(part.location.is_none());
        assert!(part.keywords.is_empty());
    }

    #[test]
    fn test_two_segments_in_order() {
        let parts = QueryProcessor::default().process("castelos e museus");
        let categories: Vec<_> = parts.iter().map(|p| p.category).collect();
        assert_eq!(categories, vec![Some(Category::Castles), Some(Category::Museums)]);
        assert_eq!(parts[0].original_text, "castelos");
        assert_eq!(parts[1].original_text, "museus");
    }

    #[test]
    fn test_ambiguous_keyword_fans_out() {
        let parts = QueryProcessor::default().extract("duas aldeias perto de mim em góis");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].category, Some(Category::LimestoneVillages));
        assert_eq!(parts[1].category, Some(Category::SchistVillages));
        for part in &parts {
            assert_eq!(part.quantity, Some(2));
            assert!(part.nearby);
            assert_eq!(part.location.as_deref(), Some("góis"));
            assert_eq!(part.original_text, "duas aldeias perto de mim em góis");
        }
    }

    #[test]
    fn test_location_only_part() {
        let parts = QueryProcessor::default().extract("o que há em penela");
        assert_eq!(parts, vec![QueryPart::new("o que há em penela").with_location("penela")]);
    }

    #[test]
    fn test_location_with_filler_words() {
        let processor = QueryProcessor::default();
        for query in ["o que visitar em coimbra", "sugestões para coimbra", "lugares em coimbra"] {
            let parts = processor.extract(query);
            assert_eq!(parts.len(), 1);
            assert_eq!(parts[0].location.as_deref(), Some("coimbra"));
            assert!(parts[0].keywords.is_empty(), "{query}");
            assert!(parts[0].category.is_none());
        }
    }

    #[test]
    fn test_keyword_fallback() {
        let parts = QueryProcessor::default().extract("igreja românica");
        assert_eq!(parts.len(), 1);
        assert!(parts[0].category.is_none());
        assert_eq!(parts[0].keywords, vec!["igreja", "românica"]);
    }

    #[test]
    fn test_empty_queries() {
        let processor = QueryProcessor::default();
        assert!(processor.process("").is_empty());
        assert!(processor.process(" , e ; ").is_empty());
    }

    #[test]
    fn test_cache_reuses_parse() {
        let processor = QueryProcessor::new(8);
        let first = processor.process("Castelos e Museus");
        let second = processor.process("castelos e museus  ");
        assert_eq!(first, second);

        let stats = processor.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);

        processor.clear_cache();
        assert_eq!(processor.cache_stats().size, 0);
    }
}
