use serde::Deserialize;

use super::address::Address;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    pub position: u32,
    pub address: Address,
    #[serde(default)]
    pub destination: bool,
}

impl Waypoint {
    pub fn new(position: u32, address: Address, destination: bool) -> Self {
        Waypoint {
            position,
            address,
            destination,
        }
    }
}
