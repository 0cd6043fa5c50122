//! Reverse geocoding: coordinates in, partial postal address out.

pub mod client;
pub mod nominatim;
pub mod types;

pub use client::{
    reverse_geocode, GeocoderConfig, ReverseGeocoder, DEFAULT_BASE_URL, DEFAULT_USER_AGENT,
};
pub use types::{
    AddressRecord, Coordinate, DeliveryAddress, ErrorResult, GeocodeError, LookupResult,
};
