use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::geo::Position;


#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("Position request timed out after {0} ms")]
    Timeout(u64),

    #[error("Provider error: {0}")]
    Provider(String),
}


#[async_trait]
pub trait PositionProvider: Send + Sync {

    async fn current_position(&self) -> Result<Position, GeolocationError>;


    fn provider_name(&self) -> &str;
}


#[async_trait]
impl PositionProvider for Arc<dyn PositionProvider> {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        (**self).current_position().await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }
}
