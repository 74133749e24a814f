pub mod base;
pub mod fixed;

pub use base::{GeolocationError, PositionProvider};
pub use fixed::{FixedPositionProvider, UnavailablePositionProvider};
