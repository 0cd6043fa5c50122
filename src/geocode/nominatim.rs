//! Wire types for the Nominatim `/reverse` response and field extraction.

use super::types::{AddressRecord, DeliveryAddress};
use serde::Deserialize;

/// Body of `GET /reverse?format=json&addressdetails=1`.
///
/// Only the fields we read are modelled; everything else is ignored.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct NominatimReverse {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub address: Option<NominatimAddress>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NominatimAddress {
    #[serde(default)]
    pub road: Option<String>,
    #[serde(default)]
    pub neighbourhood: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub town: Option<String>,
    #[serde(default)]
    pub village: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

fn text(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

/// First value that is present and non-empty.
fn first_non_empty<'a>(values: &[&'a Option<String>]) -> Option<&'a str> {
    values
        .iter()
        .copied()
        .filter_map(Option::as_deref)
        .find(|s| !s.is_empty())
}

impl NominatimReverse {
    fn address_or_empty(&self) -> NominatimAddress {
        self.address.clone().unwrap_or_default()
    }

    pub fn to_address_record(&self) -> AddressRecord {
        let a = self.address_or_empty();
        AddressRecord {
            road: text(&a.road),
            neighbourhood: text(&a.neighbourhood),
            suburb: text(&a.suburb),
            city: text(&a.city),
            state: text(&a.state),
            pincode: text(&a.postcode),
        }
    }

    pub fn to_delivery_address(&self) -> DeliveryAddress {
        let a = self.address_or_empty();

        let locality = first_non_empty(&[&a.suburb, &a.neighbourhood]);
        let street = [a.road.as_deref(), locality]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        DeliveryAddress {
            street,
            city: first_non_empty(&[&a.city, &a.town, &a.village])
                .unwrap_or_default()
                .to_string(),
            state: text(&a.state),
            pincode: text(&a.postcode),
            country: text(&a.country),
            formatted: text(&self.display_name),
        }
    }
}
