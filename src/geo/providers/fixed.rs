use async_trait::async_trait;
use tracing::debug;

use super::base::{GeolocationError, PositionProvider};
use crate::geo::Position;

/// Always answers with the same position (a configured home, or one sent by the client).
pub struct FixedPositionProvider {
    position: Position,
}

impl FixedPositionProvider {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionProvider for FixedPositionProvider {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        debug!(
            "Fixed position: {}, {}",
            self.position.latitude, self.position.longitude
        );
        Ok(self.position)
    }

    fn provider_name(&self) -> &str {
        "fixed"
    }
}

/// Stand-in for a device that never grants a position.
pub struct UnavailablePositionProvider {
    reason: String,
}

impl UnavailablePositionProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Default for UnavailablePositionProvider {
    fn default() -> Self {
        Self::new("no geolocation source configured")
    }
}

#[async_trait]
impl PositionProvider for UnavailablePositionProvider {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        Err(GeolocationError::Unavailable(self.reason.clone()))
    }

    fn provider_name(&self) -> &str {
        "unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_returns_position() {
        let provider = FixedPositionProvider::new(Position::new(40.2, -8.4));
        let position = provider.current_position().await.unwrap();
        assert_eq!(position, Position::new(40.2, -8.4));
        assert_eq!(provider.provider_name(), "fixed");
    }

    #[tokio::test]
    async fn test_unavailable_fails() {
        let provider = UnavailablePositionProvider::new("denied");
        let err = provider.current_position().await.unwrap_err();
        assert_eq!(err, GeolocationError::Unavailable("denied".to_string()));
    }
}
