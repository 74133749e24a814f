use futures::future::join_all;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, debug, info, info_span};
use uuid::Uuid;

use super::matcher::match_part;
use super::query_processor::{QueryPart, QueryProcessor};
use super::ranking::{apply_cap, rank};
use super::result::SearchResult;
use crate::catalog::Catalog;
use crate::core::config::GuiaConfig;
use crate::geo::{PositionProvider, QueryPosition};
use crate::utils::safe_truncate_ellipsis;

/// Entry point of the search core: utterance in, deduplicated results out.
pub struct LocalSearch {
    catalog: Arc<Catalog>,
    processor: QueryProcessor,
    position_provider: Arc<dyn PositionProvider>,
    geolocation_timeout: Duration,
    default_cap: usize,
}

impl LocalSearch {
    pub fn new(catalog: Arc<Catalog>, position_provider: Arc<dyn PositionProvider>) -> Self {
        Self {
            catalog,
            processor: QueryProcessor::default(),
            position_provider,
            geolocation_timeout: Duration::from_millis(crate::DEFAULT_GEOLOCATION_TIMEOUT_MS),
            default_cap: crate::DEFAULT_RESULT_CAP,
        }
    }

    pub fn from_config(
        catalog: Arc<Catalog>,
        position_provider: Arc<dyn PositionProvider>,
        config: &GuiaConfig,
    ) -> Self {
        Self {
            catalog,
            processor: QueryProcessor::new(config.parse_cache_size),
            position_provider,
            geolocation_timeout: config.geolocation_timeout(),
            default_cap: config.default_result_cap.max(1),
        }
    }

    pub fn with_geolocation_timeout(mut self, timeout: Duration) -> Self {
        self.geolocation_timeout = timeout;
        self
    }

    pub fn with_default_cap(mut self, cap: usize) -> Self {
        self.default_cap = cap.max(1);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn processor(&self) -> &QueryProcessor {
        &self.processor
    }

    pub fn default_cap(&self) -> usize {
        self.default_cap
    }


    pub fn parse(&self, query: &str) -> Vec<QueryPart> {
        self.processor.process(query)
    }

    pub async fn search_local_data(&self, query: &str) -> Vec<SearchResult> {
        self.search_with_provider(query, Arc::clone(&self.position_provider))
            .await
    }

    /// Same as [`search_local_data`](Self::search_local_data) with a caller-specific
    /// position source, e.g. coordinates sent along with a request.
    pub async fn search_with_provider(
        &self,
        query: &str,
        position_provider: Arc<dyn PositionProvider>,
    ) -> Vec<SearchResult> {
        let span = info_span!("search_local_data", query_id = %Uuid::new_v4());

        async move {
            let parts = self.processor.process(query);
            if parts.is_empty() {
                debug!("No query parts extracted");
                return Vec::new();
            }

            let position = QueryPosition::new(position_provider, self.geolocation_timeout);

            // join_all yields in input order, so part order survives concurrency.
            let groups = join_all(parts.iter().map(|part| self.run_part(part, &position))).await;
            let results = merge_results(groups);

            info!(
                "'{}': {} part(s), {} result(s)",
                safe_truncate_ellipsis(query.trim(), 50),
                parts.len(),
                results.len()
            );
            results
        }
        .instrument(span)
        .await
    }

    async fn run_part(&self, part: &QueryPart, position: &QueryPosition) -> Vec<SearchResult> {
        let matched = match_part(&self.catalog, part);
        let ranked = rank(matched, part, position).await;
        apply_cap(ranked, part, self.default_cap)
    }
}

/// Concatenates per-part groups in order and keeps the first result seen for each POI name.
pub fn merge_results(groups: Vec<Vec<SearchResult>>) -> Vec<SearchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    groups
        .into_iter()
        .flatten()
        .filter(|result| seen.insert(result.name.clone()))
        .collect()
}
