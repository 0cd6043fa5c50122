use crate::geocode::ReverseGeocoder;

pub struct AppState {
    pub geocoder: ReverseGeocoder,
}
