use jiff::civil::{Date, Time};
use serde::Serialize;

use crate::proposal::{
    address::Address,
    matching::MatchingId,
    proposal::ProposalId,
    route_filters::DetourStatistics,
    week::WeekSchedule,
};

use super::{fare::Fares, timeline::ResultWaypoint};

/// One directional leg (outward or return) of a result.
///
/// A degraded item only carries its schedule: no waypoints, statistics or
/// fares.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    /// The counterpart proposal of this leg.
    pub proposal_id: ProposalId,
    pub matching_id: Option<MatchingId>,
    pub date: Option<Date>,
    pub time: Option<Time>,
    #[serde(flatten)]
    pub week: WeekSchedule,
    pub multiple_times: bool,
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
    pub waypoints: Vec<ResultWaypoint>,
    pub origin: Option<Address>,
    pub destination: Option<Address>,
    pub origin_driver: Option<Address>,
    pub destination_driver: Option<Address>,
    pub origin_passenger: Option<Address>,
    pub destination_passenger: Option<Address>,
    #[serde(flatten)]
    pub statistics: Option<DetourStatistics>,
    #[serde(flatten)]
    pub fares: Option<Fares>,
}

impl ResultItem {
    pub fn has_multiple_times(&self) -> bool {
        self.multiple_times
    }

    pub fn is_complete(&self) -> bool {
        self.fares.is_some()
    }

    pub fn computed_price(&self) -> Option<f64> {
        self.fares.map(|fares| fares.computed_price)
    }

    pub fn computed_rounded_price(&self) -> Option<f64> {
        self.fares.map(|fares| fares.computed_rounded_price)
    }

    /// Single display time of a regular leg: the first weekday time, in
    /// weekday order, unless the weekdays disagree.
    pub fn display_time(&self) -> Option<Time> {
        if self.multiple_times {
            return None;
        }
        self.week.first_time()
    }
}
