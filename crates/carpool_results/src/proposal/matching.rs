use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::define_id_newtype;

use super::{address::Address, proposal::Proposal, week::Day};

define_id_newtype!(MatchingId);

/// A candidate pairing between the requester proposal and a counterpart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matching {
    /// Absent for transient matchings computed for a search.
    pub id: Option<MatchingId>,
    pub counterpart: Box<Proposal>,
    #[serde(default, deserialize_with = "or_default")]
    pub filters: MatchingFilters,
    /// The matching of the linked return proposals.
    pub related: Option<Box<Matching>>,
}

impl Matching {
    pub fn new(counterpart: Proposal, filters: MatchingFilters) -> Self {
        Matching {
            id: None,
            counterpart: Box::new(counterpart),
            filters,
            related: None,
        }
    }
}

/// Filter bag handed over by the route computation service, as received.
/// Nothing here fails to deserialize on a bad value: validation happens in
/// [`super::route_filters::RouteFilters`], one matching at a time.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingFilters {
    #[serde(default, deserialize_with = "or_default")]
    pub route: Option<Vec<RawRouteStep>>,
    pub original_distance: Option<RawNumber>,
    pub accepted_detour_distance: Option<RawNumber>,
    pub new_distance: Option<RawNumber>,
    pub detour_distance: Option<RawNumber>,
    pub detour_distance_percent: Option<RawNumber>,
    pub original_duration: Option<RawNumber>,
    pub accepted_detour_duration: Option<RawNumber>,
    pub new_duration: Option<RawNumber>,
    pub detour_duration: Option<RawNumber>,
    pub detour_duration_percent: Option<RawNumber>,
    pub common_distance: Option<RawNumber>,
    pub pickup: Option<PickupTimes>,
}

/// A numeric value as sent by the route service, which writes some numbers
/// as strings (`"position": "0"`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Invalid,
}

impl RawNumber {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Number(value) => Some(*value),
            RawNumber::Text(text) => text.trim().parse().ok(),
            RawNumber::Invalid => None,
        }
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<Value> for RawNumber {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(number) => number.as_f64().map_or(RawNumber::Invalid, RawNumber::Number),
            Value::String(text) => RawNumber::Text(text),
            _ => RawNumber::Invalid,
        }
    }
}

/// One entry of the `route` array. Any JSON value is accepted; null and
/// absent keys both read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct RawRouteStep {
    /// 1 for the driver route, 2 for the passenger route.
    pub candidate: Option<RawNumber>,
    pub position: Option<RawNumber>,
    /// Seconds elapsed since the driver's departure.
    pub duration: Option<RawNumber>,
    pub address: Option<Value>,
}

impl RawRouteStep {
    pub fn new(candidate: u8, position: i64, duration: f64, address: &Address) -> Self {
        RawRouteStep {
            candidate: Some(RawNumber::from(f64::from(candidate))),
            position: Some(RawNumber::from(position as f64)),
            duration: Some(RawNumber::from(duration)),
            address: serde_json::to_value(address).ok(),
        }
    }
}

impl From<Value> for RawRouteStep {
    fn from(value: Value) -> Self {
        let field = |key: &str| value.get(key).filter(|field| !field.is_null()).cloned();

        RawRouteStep {
            candidate: field("candidate").map(RawNumber::from),
            position: field("position").map(RawNumber::from),
            duration: field("duration").map(RawNumber::from),
            address: field("address"),
        }
    }
}

const PICKUP_KEYS: [(Day, &str, &str); 7] = [
    (Day::Mon, "monMinPickupTime", "monMaxPickupTime"),
    (Day::Tue, "tueMinPickupTime", "tueMaxPickupTime"),
    (Day::Wed, "wedMinPickupTime", "wedMaxPickupTime"),
    (Day::Thu, "thuMinPickupTime", "thuMaxPickupTime"),
    (Day::Fri, "friMinPickupTime", "friMaxPickupTime"),
    (Day::Sat, "satMinPickupTime", "satMaxPickupTime"),
    (Day::Sun, "sunMinPickupTime", "sunMaxPickupTime"),
];

/// Weekdays whose pickup window was already resolved for a regular ad. Only
/// the days having both bounds are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Value")]
pub struct PickupTimes {
    days: Vec<Day>,
}

impl PickupTimes {
    pub fn days(&self) -> impl Iterator<Item = Day> + '_ {
        self.days.iter().copied()
    }
}

impl From<Value> for PickupTimes {
    fn from(value: Value) -> Self {
        let present = |key: &str| value.get(key).is_some_and(|bound| !bound.is_null());

        PickupTimes {
            days: PICKUP_KEYS
                .iter()
                .filter(|(_, min, max)| present(min) && present(max))
                .map(|(day, _, _)| *day)
                .collect(),
        }
    }
}

/// Falls back to the default when the value has the wrong shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_days_need_both_bounds() {
        let pickup: PickupTimes = serde_json::from_str(
            r#"{
                "monMinPickupTime": "07:50:00",
                "monMaxPickupTime": "08:10:00",
                "tueMinPickupTime": "07:50:00",
                "wedMinPickupTime": "7h50",
                "wedMaxPickupTime": "8h10"
            }"#,
        )
        .unwrap();

        assert_eq!(pickup.days().collect::<Vec<_>>(), vec![Day::Mon, Day::Wed]);
    }

    #[test]
    fn test_lenient_filters() {
        let filters: MatchingFilters =
            serde_json::from_str(r#"{"originalDistance": 1200, "unknownKey": true}"#).unwrap();

        assert_eq!(filters.original_distance, Some(RawNumber::Number(1200.0)));
        assert!(filters.route.is_none());
    }

    #[test]
    fn test_malformed_values_still_deserialize() {
        let filters: MatchingFilters = serde_json::from_str(
            r#"{
                "originalDistance": "1200",
                "commonDistance": {"meters": 3},
                "route": [
                    {"candidate": 256, "position": "0", "duration": null},
                    "not a step"
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(filters.original_distance.and_then(|v| v.as_f64()), Some(1200.0));
        assert_eq!(filters.common_distance, Some(RawNumber::Invalid));

        let route = filters.route.unwrap();
        assert_eq!(route[0].candidate, Some(RawNumber::Number(256.0)));
        assert_eq!(route[0].position.as_ref().and_then(RawNumber::as_f64), Some(0.0));
        assert_eq!(route[0].duration, None);
        assert_eq!(route[0].address, None);
        assert_eq!(route[1], RawRouteStep::default());
    }

    #[test]
    fn test_filters_of_the_wrong_shape_read_as_empty() {
        let matching: Matching = serde_json::from_str(
            r#"{
                "counterpart": {"id": 2, "criteria": {}},
                "filters": {"route": "broken", "originalDistance": 1}
            }"#,
        )
        .unwrap();
        assert!(matching.filters.route.is_none());

        let matching: Matching =
            serde_json::from_str(r#"{"counterpart": {"id": 2, "criteria": {}}, "filters": 42}"#)
                .unwrap();
        assert!(matching.filters.original_distance.is_none());
    }
}
