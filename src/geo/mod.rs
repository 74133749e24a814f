pub mod distance;
pub mod position;
pub mod providers;

pub use distance::{EARTH_RADIUS_KM, Position, haversine_km};
pub use position::QueryPosition;
pub use providers::{
    FixedPositionProvider, GeolocationError, PositionProvider, UnavailablePositionProvider,
};
