use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use super::providers::{GeolocationError, PositionProvider};
use super::Position;

/// Caller position for one top-level query.
///
/// The provider is asked at most once, under a timeout; every nearby part of the
/// query shares the outcome, success or failure.
pub struct QueryPosition {
    provider: Arc<dyn PositionProvider>,
    timeout: Duration,
    resolved: OnceCell<Result<Position, GeolocationError>>,
}

impl QueryPosition {
    pub fn new(provider: Arc<dyn PositionProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            timeout,
            resolved: OnceCell::new(),
        }
    }


    pub async fn get(&self) -> Result<Position, GeolocationError> {
        self.resolved
            .get_or_init(|| self.request())
            .await
            .clone()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.initialized()
    }

    async fn request(&self) -> Result<Position, GeolocationError> {
        debug!(
            "Requesting position from provider={} (timeout={:?})",
            self.provider.provider_name(),
            self.timeout
        );

        match tokio::time::timeout(self.timeout, self.provider.current_position()).await {
            Ok(Ok(position)) => Ok(position),
            Ok(Err(e)) => {
                warn!("Geolocation provider {} failed: {}", self.provider.provider_name(), e);
                Err(e)
            }
            Err(_) => {
                let millis = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(
                    "Geolocation provider {} timed out after {} ms",
                    self.provider.provider_name(),
                    millis
                );
                Err(GeolocationError::Timeout(millis))
            }
        }
    }
}
