//! Core types for the reverse geocoding subsystem.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS84 point. Not range-checked; the remote service decides validity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}",
            self.lat.abs(),
            ns,
            self.lon.abs(),
            ew
        )
    }
}

/// The six address fields returned by a successful lookup.
///
/// Every field is always present; a value the service omitted is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub road: String,
    pub neighbourhood: String,
    pub suburb: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// A delivery-oriented view of the same response, with locality fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    /// Road plus suburb (or neighbourhood), comma separated.
    pub street: String,
    /// City, else town, else village.
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub country: String,
    /// The service's full `display_name`.
    pub formatted: String,
}

/// Non-200 answer from the geocoding service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn from_status(status: u16) -> Self {
        Self {
            error: format!("Error: {}", status),
        }
    }
}

/// Outcome of a lookup that reached the service and got an HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupResult<T = AddressRecord> {
    Found(T),
    Failed(ErrorResult),
}

impl<T> LookupResult<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(v) => Some(v),
            Self::Failed(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> LookupResult<U> {
        match self {
            Self::Found(v) => LookupResult::Found(f(v)),
            Self::Failed(e) => LookupResult::Failed(e),
        }
    }
}

/// Failures that never produced a usable HTTP status.
#[derive(Debug)]
pub enum GeocodeError {
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Network error: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid API response: {}", msg),
        }
    }
}

impl std::error::Error for GeocodeError {}
