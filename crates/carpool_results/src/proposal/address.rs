use geo_types::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_locality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Address {
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Address {
            latitude: Some(lat),
            longitude: Some(lon),
            ..Address::default()
        }
    }

    pub fn point(&self) -> Option<Point> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Point::new(lon, lat)),
            _ => None,
        }
    }

    /// Compares GPS coordinates; labels are ignored.
    pub fn same_coordinates(&self, other: &Address) -> bool {
        match (self.point(), other.point()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
