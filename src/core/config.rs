

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use super::error::{CentroGuiaError, Result};

pub const ENV_PREFIX: &str = "CENTRO_GUIA";
pub const DEFAULT_CONFIG_FILE: &str = "centro-guia";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiaConfig {

    pub catalog_path: PathBuf,


    pub default_result_cap: usize,
    pub geolocation_timeout_ms: u64,
    pub parse_cache_size: usize,


    pub rate_limit_max_requests: usize,
    pub rate_limit_window_secs: u64,

    /// Fixed caller position used by the binaries when no device provider exists.
    pub home_latitude: Option<f64>,
    pub home_longitude: Option<f64>,
}

impl GuiaConfig {

    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            default_result_cap: crate::DEFAULT_RESULT_CAP,
            geolocation_timeout_ms: crate::DEFAULT_GEOLOCATION_TIMEOUT_MS,
            parse_cache_size: crate::DEFAULT_PARSE_CACHE_SIZE,
            rate_limit_max_requests: 10,
            rate_limit_window_secs: 60,
            home_latitude: None,
            home_longitude: None,
        }
    }

    /// Defaults, then `centro-guia.{toml,json,..}` if present, then `CENTRO_GUIA_*` variables.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&Self::default())?;

        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: Self = Config::builder()
            .add_source(defaults)
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_result_cap == 0 {
            return Err(CentroGuiaError::Validation(
                "default_result_cap must be at least 1".to_string(),
            ));
        }
        if self.geolocation_timeout_ms == 0 {
            return Err(CentroGuiaError::Validation(
                "geolocation_timeout_ms must be at least 1".to_string(),
            ));
        }
        if self.rate_limit_max_requests == 0 || self.rate_limit_window_secs == 0 {
            return Err(CentroGuiaError::Validation(
                "rate limit needs a positive request count and window".to_string(),
            ));
        }
        match (self.home_latitude, self.home_longitude) {
            (Some(lat), Some(lon)) => {
                if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                    return Err(CentroGuiaError::Validation(format!(
                        "home position out of range: {lat}, {lon}"
                    )));
                }
            }
            (None, None) => {}
            _ => {
                return Err(CentroGuiaError::Config(
                    "home_latitude and home_longitude must be set together".to_string(),
                ));
            }
        }
        Ok(())
    }


    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_millis(self.geolocation_timeout_ms)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }

    pub fn home_position(&self) -> Option<crate::geo::Position> {
        match (self.home_latitude, self.home_longitude) {
            (Some(latitude), Some(longitude)) => Some(crate::geo::Position::new(latitude, longitude)),
            _ => None,
        }
    }
}

impl Default for GuiaConfig {
    fn default() -> Self {
        Self::new("data/pois.json")
    }
}
