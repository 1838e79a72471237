use jiff::SignedDuration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    address::Address,
    matching::{MatchingFilters, RawNumber, RawRouteStep},
    meters::Meters,
    week::Day,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("missing filter key `{0}`")]
    MissingKey(&'static str),
    #[error("invalid value for filter key `{0}`")]
    InvalidValue(&'static str),
    #[error("invalid `{key}` in route step {step}")]
    InvalidStep { step: usize, key: &'static str },
}

/// Which route a step belongs to. Tag 1 is always the driver route and
/// tag 2 the passenger route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Passenger,
}

impl Role {
    pub fn from_tag(tag: f64) -> Option<Role> {
        if tag == 1.0 {
            Some(Role::Driver)
        } else if tag == 2.0 {
            Some(Role::Passenger)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    pub role: Role,
    pub position: u32,
    /// Elapsed time since the driver's departure, rounded to the second.
    pub duration: SignedDuration,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetourStatistics {
    pub original_distance: Meters,
    pub accepted_detour_distance: Option<Meters>,
    pub new_distance: Option<Meters>,
    pub detour_distance: Meters,
    pub detour_distance_percent: Option<f64>,
    /// Durations are in seconds.
    pub original_duration: Option<i64>,
    pub accepted_detour_duration: Option<i64>,
    pub new_duration: Option<i64>,
    pub detour_duration: Option<i64>,
    pub detour_duration_percent: Option<f64>,
    pub common_distance: Meters,
}

/// A validated filter bag: every key needed to build a result is present
/// and every value is clamped to a sane range.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteFilters {
    pub route: Vec<RouteStep>,
    pub statistics: DetourStatistics,
    /// Weekdays with pre-computed pickup windows, for regular ads.
    pub pickup_days: Option<Vec<Day>>,
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn rounded_seconds(value: f64) -> i64 {
    non_negative(value).round() as i64
}

fn required(value: Option<&RawNumber>, key: &'static str) -> Result<Meters, FilterError> {
    value
        .ok_or(FilterError::MissingKey(key))?
        .as_f64()
        .map(Meters::sanitized)
        .ok_or(FilterError::InvalidValue(key))
}

/// Optional statistics that cannot be read are dropped.
fn optional(value: Option<&RawNumber>) -> Option<f64> {
    value.and_then(RawNumber::as_f64)
}

impl RouteStep {
    fn try_from_raw(step: usize, raw: &RawRouteStep) -> Result<Self, FilterError> {
        let invalid = |key| FilterError::InvalidStep { step, key };
        let number = |value: Option<&RawNumber>, key| {
            value.and_then(RawNumber::as_f64).ok_or(invalid(key))
        };

        let role = Role::from_tag(number(raw.candidate.as_ref(), "candidate")?)
            .ok_or(invalid("candidate"))?;
        let position = number(raw.position.as_ref(), "position")?;
        let duration = match &raw.duration {
            Some(duration) => duration.as_f64().ok_or(invalid("duration"))?,
            None => 0.0,
        };
        let address = raw
            .address
            .as_ref()
            .and_then(|address| Address::deserialize(address).ok())
            .ok_or(invalid("address"))?;

        Ok(RouteStep {
            role,
            // Saturating: negative and NaN positions become 0.
            position: position.max(0.0) as u32,
            duration: SignedDuration::from_secs(rounded_seconds(duration)),
            address,
        })
    }
}

impl TryFrom<&MatchingFilters> for RouteFilters {
    type Error = FilterError;

    fn try_from(filters: &MatchingFilters) -> Result<Self, Self::Error> {
        let raw_route = filters
            .route
            .as_ref()
            .ok_or(FilterError::MissingKey("route"))?;

        let route = raw_route
            .iter()
            .enumerate()
            .map(|(step, raw)| RouteStep::try_from_raw(step, raw))
            .collect::<Result<Vec<_>, _>>()?;

        let statistics = DetourStatistics {
            original_distance: required(
                filters.original_distance.as_ref(),
                "originalDistance",
            )?,
            detour_distance: required(filters.detour_distance.as_ref(), "detourDistance")?,
            common_distance: required(filters.common_distance.as_ref(), "commonDistance")?,
            accepted_detour_distance: optional(filters.accepted_detour_distance.as_ref())
                .map(Meters::sanitized),
            new_distance: optional(filters.new_distance.as_ref()).map(Meters::sanitized),
            detour_distance_percent: optional(filters.detour_distance_percent.as_ref())
                .map(non_negative),
            original_duration: optional(filters.original_duration.as_ref()).map(rounded_seconds),
            accepted_detour_duration: optional(filters.accepted_detour_duration.as_ref())
                .map(rounded_seconds),
            new_duration: optional(filters.new_duration.as_ref()).map(rounded_seconds),
            detour_duration: optional(filters.detour_duration.as_ref()).map(rounded_seconds),
            detour_duration_percent: optional(filters.detour_duration_percent.as_ref())
                .map(non_negative),
        };

        let pickup_days = filters
            .pickup
            .as_ref()
            .map(|pickup| pickup.days().collect());

        Ok(RouteFilters {
            route,
            statistics,
            pickup_days,
        })
    }
}

impl RouteFilters {
    /// Travel time from the driver's departure to the passenger's pickup point.
    pub fn pickup_offset(&self) -> SignedDuration {
        self.route
            .iter()
            .find(|step| step.role == Role::Passenger && step.position == 0)
            .map_or(SignedDuration::ZERO, |step| step.duration)
    }

    /// Highest position of a role's route: its destination index.
    pub fn last_position(&self, role: Role) -> u32 {
        self.route
            .iter()
            .filter(|step| step.role == role)
            .map(|step| step.position)
            .max()
            .unwrap_or(0)
    }
}
