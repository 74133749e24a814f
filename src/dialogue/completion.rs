use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::search::SearchResult;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompletionError {
    #[error("API key error: {0}")]
    ApiKey(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Insufficient quota: {0}")]
    QuotaExceeded(String),

    #[error("No response received from provider")]
    EmptyResponse,

    #[error("Provider error: {0}")]
    Provider(String),
}

/// Generation service that turns the query and its local results into an answer.
/// Prompt construction belongs to the implementation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {

    async fn complete(&self, query: &str, results: &[SearchResult]) -> Result<String, CompletionError>;


    fn provider_name(&self) -> &str;
}


#[async_trait]
impl CompletionProvider for Arc<dyn CompletionProvider> {
    async fn complete(&self, query: &str, results: &[SearchResult]) -> Result<String, CompletionError> {
        (**self).complete(query, results).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
