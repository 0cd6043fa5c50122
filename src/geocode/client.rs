//! Blocking client for a Nominatim-compatible `/reverse` endpoint.

use super::nominatim::NominatimReverse;
use super::types::{
    AddressRecord, Coordinate, DeliveryAddress, ErrorResult, GeocodeError, LookupResult,
};
use log::{debug, warn};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim's usage policy blocks requests without an identifying agent.
pub const DEFAULT_USER_AGENT: &str = "MyGeoApp/1.0 (your_email@example.com)";

/// Where and how to reach the geocoding service.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderConfig {
    /// Service root, without the `/reverse` path.
    pub base_url: String,
    pub user_agent: String,
    /// Overall request timeout. `None` keeps ureq's defaults: a 30s connect
    /// timeout and no limit on reading the response.
    pub timeout: Option<Duration>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl GeocoderConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url.trim_end_matches('/'))
    }
}

/// Reverse geocoder. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ReverseGeocoder {
    config: GeocoderConfig,
    agent: ureq::Agent,
}

impl Default for ReverseGeocoder {
    fn default() -> Self {
        Self::new(GeocoderConfig::default())
    }
}

impl ReverseGeocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            config,
            agent: builder.build(),
        }
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Look up the six-field address for a coordinate.
    ///
    /// A non-200 status is a normal outcome (`LookupResult::Failed`). Transport
    /// failures and unparseable bodies are returned as `GeocodeError`.
    pub fn reverse_geocode(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<LookupResult<AddressRecord>, GeocodeError> {
        Ok(self.fetch(lat, lon)?.map(|r| r.to_address_record()))
    }

    pub fn lookup(&self, coord: Coordinate) -> Result<LookupResult<AddressRecord>, GeocodeError> {
        self.reverse_geocode(coord.lat, coord.lon)
    }

    /// Same request as [`reverse_geocode`](Self::reverse_geocode), shaped for delivery forms.
    pub fn reverse_geocode_detailed(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<LookupResult<DeliveryAddress>, GeocodeError> {
        Ok(self.fetch(lat, lon)?.map(|r| r.to_delivery_address()))
    }

    fn fetch(&self, lat: f64, lon: f64) -> Result<LookupResult<NominatimReverse>, GeocodeError> {
        let url = self.config.reverse_url();
        debug!("GET {} lat={} lon={}", url, lat, lon);

        let result = self
            .agent
            .get(&url)
            .query("lat", &lat.to_string())
            .query("lon", &lon.to_string())
            .query("format", "json")
            .query("addressdetails", "1")
            .set("User-Agent", &self.config.user_agent)
            .call();

        let response = match result {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                warn!("Reverse geocode of ({}, {}) returned status {}", lat, lon, status);
                return Ok(LookupResult::Failed(ErrorResult::from_status(status)));
            }
            Err(ureq::Error::Transport(t)) => {
                warn!("Reverse geocode of ({}, {}) failed: {}", lat, lon, t);
                return Err(GeocodeError::Network(t.to_string()));
            }
        };

        let status = response.status();
        if status != 200 {
            warn!("Reverse geocode of ({}, {}) returned status {}", lat, lon, status);
            return Ok(LookupResult::Failed(ErrorResult::from_status(status)));
        }

        let body = response
            .into_string()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let parsed: NominatimReverse = serde_json::from_str(&body).map_err(|e| {
            warn!("Reverse geocode of ({}, {}) returned malformed JSON: {}", lat, lon, e);
            GeocodeError::InvalidResponse(e.to_string())
        })?;

        Ok(LookupResult::Found(parsed))
    }
}

/// One-shot lookup against the public Nominatim instance with default settings.
pub fn reverse_geocode(lat: f64, lon: f64) -> Result<LookupResult<AddressRecord>, GeocodeError> {
    ReverseGeocoder::default().reverse_geocode(lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = GeocoderConfig::default();
        assert_eq!(cfg.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(cfg.user_agent, "MyGeoApp/1.0 (your_email@example.com)");
        assert_eq!(cfg.timeout, None);
        assert_eq!(cfg.reverse_url(), "https://nominatim.openstreetmap.org/reverse");
    }

    #[test]
    fn test_reverse_url_trims_trailing_slash() {
        let cfg = GeocoderConfig::default().with_base_url("http://localhost:8080/");
        assert_eq!(cfg.reverse_url(), "http://localhost:8080/reverse");
    }

    #[test]
    fn test_builder_overrides() {
        let cfg = GeocoderConfig::default()
            .with_user_agent("DeliveryApp/2.0")
            .with_timeout(Some(Duration::from_secs(5)));
        assert_eq!(cfg.user_agent, "DeliveryApp/2.0");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(5)));

        let geocoder = ReverseGeocoder::new(cfg.clone());
        assert_eq!(geocoder.config(), &cfg);
    }
}
